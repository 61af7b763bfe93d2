//! Referential integrity between fact rows and reference rows.

use serde::{Deserialize, Serialize};

use super::checks::{FieldCheck, NumericFieldCheck, TierCheck};
use super::index::{CompositeKey, ReferenceKeyIndex};
use super::issue::{Issue, IssueKind};
use crate::error::{CrosscheckError, Result};
use crate::schema::{columns, Row, RowFields};

/// Counts describing one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStats {
    /// Number of fact rows examined.
    pub fact_count: usize,
    /// Number of reference rows supplied.
    pub reference_count: usize,
    /// Fact rows with an error.
    pub invalid_count: usize,
    /// Distinct valid keys in the reference index.
    pub index_size: usize,
}

/// Result of validating a fact dataset against a reference dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// True iff `errors` is empty.
    pub is_valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub stats: ValidationStats,
}

impl ValidationReport {
    /// Errors of kind `invalid_combination`, the input to the suggestion engine.
    pub fn invalid_combinations(&self) -> impl Iterator<Item = &Issue> {
        self.errors
            .iter()
            .filter(|e| e.kind == IssueKind::InvalidCombination)
    }

    pub fn has_invalid_combinations(&self) -> bool {
        self.invalid_combinations().next().is_some()
    }

    /// Number of issues of `kind` across errors and warnings.
    pub fn count(&self, kind: IssueKind) -> usize {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .filter(|i| i.kind == kind)
            .count()
    }
}

/// Classifies every fact row against the reference key space.
///
/// Stateless apart from its configured field checks; one instance can serve
/// any number of concurrent calls.
pub struct IntegrityValidator {
    field_checks: Vec<Box<dyn FieldCheck>>,
}

impl IntegrityValidator {
    /// Validator with the standard Tier and Fuzzing-Idx checks.
    pub fn new() -> Self {
        Self {
            field_checks: vec![Box::new(TierCheck), Box::new(NumericFieldCheck::fuzzing_index())],
        }
    }

    /// Validator with a custom set of secondary checks.
    pub fn with_checks(field_checks: Vec<Box<dyn FieldCheck>>) -> Self {
        Self { field_checks }
    }

    /// Validate `fact_rows` against `reference_rows`.
    pub fn validate(&self, fact_rows: &[Row], reference_rows: &[Row]) -> ValidationReport {
        self.validate_with_index(fact_rows, reference_rows).0
    }

    /// Validate and also hand back the reference index that was built, so
    /// suggestions can be computed without rebuilding it.
    pub fn validate_with_index(
        &self,
        fact_rows: &[Row],
        reference_rows: &[Row],
    ) -> (ValidationReport, ReferenceKeyIndex) {
        let (index, mut warnings) = ReferenceKeyIndex::build(reference_rows);

        let mut errors = Vec::new();
        let mut invalid = vec![false; fact_rows.len()];

        for (i, row) in fact_rows.iter().enumerate() {
            let row_number = i + 1;

            let Some(key) = CompositeKey::from_fact_row(row) else {
                errors.push(Issue::new(
                    IssueKind::MissingRequiredField,
                    row_number,
                    format!(
                        "Row {}: Missing required fields (Topic, Subtopic, or Industry)",
                        row_number
                    ),
                    row,
                ));
                invalid[i] = true;
                continue;
            };

            if !index.contains(&key) {
                errors.push(
                    Issue::new(
                        IssueKind::InvalidCombination,
                        row_number,
                        format!(
                            "Row {}: Topic \"{}\" + SubTopic \"{}\" + Industry \"{}\" combination not found in classifications",
                            row_number,
                            row.trimmed(columns::TOPIC),
                            row.trimmed(columns::SUBTOPIC),
                            row.trimmed(columns::INDUSTRY)
                        ),
                        row,
                    )
                    .with_key(key),
                );
                invalid[i] = true;
            }
        }

        // Secondary checks only on rows without an error, each check independent.
        for (i, row) in fact_rows.iter().enumerate() {
            if invalid[i] {
                continue;
            }
            warnings.extend(self.field_checks.iter().filter_map(|c| c.check(row, i + 1)));
        }

        let invalid_count = invalid.iter().filter(|&&flag| flag).count();
        let stats = ValidationStats {
            fact_count: fact_rows.len(),
            reference_count: reference_rows.len(),
            invalid_count,
            index_size: index.len(),
        };

        tracing::debug!(
            facts = stats.fact_count,
            references = stats.reference_count,
            invalid = stats.invalid_count,
            warnings = warnings.len(),
            "validated data integrity"
        );

        let report = ValidationReport {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            stats,
        };

        (report, index)
    }
}

impl Default for IntegrityValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate with the default checks.
///
/// Fails only when a dataset is absent; empty datasets are valid input.
pub fn validate_data_integrity(
    fact_rows: Option<&[Row]>,
    reference_rows: Option<&[Row]>,
) -> Result<ValidationReport> {
    match (fact_rows, reference_rows) {
        (Some(facts), Some(references)) => Ok(IntegrityValidator::new().validate(facts, references)),
        _ => Err(CrosscheckError::MissingInput(
            "Both strings and classifications data are required for validation".to_string(),
        )),
    }
}
