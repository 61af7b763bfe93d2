//! Secondary per-field checks run on rows that passed the key checks.

use super::issue::{Issue, IssueKind};
use crate::schema::{columns, Row, RowFields};

/// A check on one row that may produce a warning.
pub trait FieldCheck: Send + Sync {
    /// Inspect `row` (1-based `row_number`) and report a problem, if any.
    fn check(&self, row: &Row, row_number: usize) -> Option<Issue>;
}

/// `Tier`, when present, must be 1, 2, or 3.
pub struct TierCheck;

const VALID_TIERS: &[&str] = &["1", "2", "3"];

impl FieldCheck for TierCheck {
    fn check(&self, row: &Row, row_number: usize) -> Option<Issue> {
        let tier = row.trimmed(columns::TIER);
        if tier.is_empty() || VALID_TIERS.contains(&tier) {
            return None;
        }

        Some(Issue::new(
            IssueKind::InvalidTier,
            row_number,
            format!("Row {}: Tier should be 1, 2, or 3", row_number),
            row,
        ))
    }
}

/// A column that, when present, must parse as a number.
pub struct NumericFieldCheck {
    column: String,
}

impl NumericFieldCheck {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    /// The check applied to `Fuzzing-Idx`.
    pub fn fuzzing_index() -> Self {
        Self::new(columns::FUZZING_IDX)
    }
}

/// Numeric in the sense of a JavaScript `Number()` conversion: decimal and
/// exponent forms, unsigned `0x`/`0o`/`0b` integers, and `Infinity`.
fn is_numeric(value: &str) -> bool {
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if value.get(..2).is_some_and(|p| p.eq_ignore_ascii_case(prefix)) {
            let digits = &value[2..];
            return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
        }
    }

    if matches!(value, "Infinity" | "+Infinity" | "-Infinity") {
        return true;
    }

    // Rust also accepts "inf" and "nan" spellings.
    if value
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return false;
    }

    value.parse::<f64>().is_ok()
}

impl FieldCheck for NumericFieldCheck {
    fn check(&self, row: &Row, row_number: usize) -> Option<Issue> {
        let value = row.trimmed(&self.column);
        if value.is_empty() || is_numeric(value) {
            return None;
        }

        Some(Issue::new(
            IssueKind::InvalidNumericField,
            row_number,
            format!("Row {}: {} should be numeric", row_number, self.column),
            row,
        ))
    }
}
