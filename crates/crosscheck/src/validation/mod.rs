//! Cross-dataset integrity validation.

mod checks;
mod index;
mod integrity;
mod issue;

pub use checks::{FieldCheck, NumericFieldCheck, TierCheck};
pub use index::{CompositeKey, ReferenceKeyIndex};
pub use integrity::{validate_data_integrity, IntegrityValidator, ValidationReport, ValidationStats};
pub use issue::{Issue, IssueKind, Severity};
