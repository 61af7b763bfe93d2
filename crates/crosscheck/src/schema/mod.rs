//! Row model and dataset column contracts.

mod dataset;
mod row;
mod structure;

pub use dataset::{check_headers, columns, DatasetKind, HeaderCheck};
pub use row::{Row, RowFields};
pub use structure::{
    validate_row, validate_structure, StructureIssue, StructureIssueKind, StructureReport,
};
