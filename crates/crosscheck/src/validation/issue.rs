//! Issue types for per-row data problems.

use serde::{Deserialize, Serialize};

use super::index::CompositeKey;
use crate::schema::Row;

/// Kind of per-row problem detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Topic, Subtopic, or Industry is blank in a fact row.
    MissingRequiredField,
    /// A fact row's key is absent from the reference key index.
    InvalidCombination,
    /// A reference row is missing part of its key and was left out of the index.
    IncompleteReferenceRow,
    /// Tier present but not 1, 2, or 3.
    InvalidTier,
    /// A numeric column holds something that is not a number.
    InvalidNumericField,
}

impl IssueKind {
    /// Every kind, errors first.
    pub const ALL: [IssueKind; 5] = [
        IssueKind::MissingRequiredField,
        IssueKind::InvalidCombination,
        IssueKind::IncompleteReferenceRow,
        IssueKind::InvalidTier,
        IssueKind::InvalidNumericField,
    ];

    /// Errors block export; warnings are informational.
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::MissingRequiredField | IssueKind::InvalidCombination => Severity::Error,
            IssueKind::IncompleteReferenceRow
            | IssueKind::InvalidTier
            | IssueKind::InvalidNumericField => Severity::Warning,
        }
    }

    /// Wire name, as used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingRequiredField => "missing_required_field",
            IssueKind::InvalidCombination => "invalid_combination",
            IssueKind::IncompleteReferenceRow => "incomplete_reference_row",
            IssueKind::InvalidTier => "invalid_tier",
            IssueKind::InvalidNumericField => "invalid_numeric_field",
        }
    }

    /// Get a human-readable label for the issue kind.
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::MissingRequiredField => "Missing Required Field",
            IssueKind::InvalidCombination => "Invalid Combination",
            IssueKind::IncompleteReferenceRow => "Incomplete Reference Row",
            IssueKind::InvalidTier => "Invalid Tier",
            IssueKind::InvalidNumericField => "Invalid Numeric Field",
        }
    }
}

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth a look, never affects validity.
    Warning,
    /// Marks the fact dataset invalid.
    Error,
}

/// A problem found in one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    /// 1-based position of the row in its dataset.
    #[serde(rename = "row")]
    pub row_number: usize,
    pub message: String,
    /// Snapshot of the row as validated.
    #[serde(rename = "data")]
    pub row: Row,
    /// The offending key, for `invalid_combination`.
    #[serde(rename = "combination", skip_serializing_if = "Option::is_none", default)]
    pub key: Option<CompositeKey>,
}

impl Issue {
    /// Create a new issue; severity follows from `kind`.
    pub fn new(kind: IssueKind, row_number: usize, message: impl Into<String>, row: &Row) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            row_number,
            message: message.into(),
            row: row.clone(),
            key: None,
        }
    }

    /// Attach the composite key the issue is about.
    pub fn with_key(mut self, key: CompositeKey) -> Self {
        self.key = Some(key);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
