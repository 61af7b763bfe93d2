//! Crosscheck: referential integrity checks between two related CSV datasets.
//!
//! A "strings" dataset holds fact rows that each reference a
//! `(Topic, Subtopic, Industry)` key. A "classifications" dataset defines the
//! valid keys. Crosscheck classifies every fact row, reports errors and
//! warnings, and proposes the nearest valid keys for rows whose key is unknown.
//!
//! # Example
//!
//! ```no_run
//! use crosscheck::Crosscheck;
//!
//! let crosscheck = Crosscheck::new();
//! let result = crosscheck
//!     .check_files("strings.csv", "classifications.csv")
//!     .unwrap();
//!
//! println!("Valid: {}", result.report.is_valid);
//! for suggestion in &result.suggestions {
//!     if let Some(best) = suggestion.best() {
//!         println!("Row {}: try {} (score {})", suggestion.for_row_number, best.candidate, best.score);
//!     }
//! }
//! ```

pub mod error;
pub mod input;
pub mod schema;
pub mod session;
pub mod suggestion;
pub mod validation;

mod crosscheck;

pub use crate::crosscheck::{CheckResult, CheckSummary, Crosscheck, CrosscheckConfig, LoadedDataset};
pub use error::{CrosscheckError, Result};
pub use input::{
    sanitize_json_rows, sanitize_rows, write_csv, write_csv_file, DataTable, JsonRow, Parser,
    ParserConfig, SourceMetadata,
};
pub use schema::{check_headers, validate_row, validate_structure, DatasetKind, Row, RowFields};
pub use session::{Dataset, MemorySessionStore, SessionStore};
pub use suggestion::{RankedCandidate, Suggestion, SuggestionEngine};
pub use validation::{
    validate_data_integrity, CompositeKey, IntegrityValidator, Issue, IssueKind, ReferenceKeyIndex,
    Severity, ValidationReport, ValidationStats,
};

/// Suggest corrections for the `invalid_combination` errors of a report.
pub fn suggest_corrections(errors: &[Issue], index: &ReferenceKeyIndex) -> Vec<Suggestion> {
    SuggestionEngine::suggest(errors, index)
}
