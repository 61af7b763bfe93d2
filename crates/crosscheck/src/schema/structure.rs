//! Structural checks on a single dataset, independent of the other one.

use serde::{Deserialize, Serialize};

use super::dataset::DatasetKind;
use super::row::{Row, RowFields};

/// Kind of structural problem found in one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureIssueKind {
    /// The dataset has no rows at all.
    EmptyFile,
    /// A row has no entry for one of the header columns.
    MissingColumn,
    /// Every cell in the row is blank.
    EmptyRow,
}

/// One structural problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureIssue {
    #[serde(rename = "type")]
    pub kind: StructureIssueKind,
    pub message: String,
    /// 1-based row number, when the issue belongs to a row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

/// Result of [`validate_structure`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureReport {
    pub is_valid: bool,
    pub errors: Vec<StructureIssue>,
    pub warnings: Vec<StructureIssue>,
}

/// Check that a dataset is non-empty, every row carries every header
/// column, and flag rows with no data at all.
pub fn validate_structure(rows: &[Row], headers: &[String]) -> StructureReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if rows.is_empty() {
        errors.push(StructureIssue {
            kind: StructureIssueKind::EmptyFile,
            message: "CSV file is empty or contains no valid data rows".to_string(),
            row: None,
            column: None,
        });
        return StructureReport {
            is_valid: false,
            errors,
            warnings,
        };
    }

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;

        for header in headers {
            if !row.contains_key(header) {
                errors.push(StructureIssue {
                    kind: StructureIssueKind::MissingColumn,
                    message: format!("Row {}: Missing column \"{}\"", row_number, header),
                    row: Some(row_number),
                    column: Some(header.clone()),
                });
            }
        }

        if row.is_empty_row() {
            warnings.push(StructureIssue {
                kind: StructureIssueKind::EmptyRow,
                message: format!("Row {}: Contains no data", row_number),
                row: Some(row_number),
                column: None,
            });
        }
    }

    StructureReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// List the required fields of `kind` that are blank in `row`.
///
/// Returns messages of the form `"Topic is required"`; empty means the row
/// is acceptable as an edit.
pub fn validate_row(row: &Row, kind: DatasetKind) -> Vec<String> {
    kind.required_fields()
        .iter()
        .filter(|field| row.is_blank(field))
        .map(|field| format!("{} is required", field))
        .collect()
}
