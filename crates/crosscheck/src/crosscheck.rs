//! Main Crosscheck struct and public API.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{sanitize_rows, Parser, ParserConfig, SourceMetadata};
use crate::schema::{check_headers, DatasetKind, Row};
use crate::session::{Dataset, DEFAULT_SESSION_TTL_HOURS};
use crate::suggestion::{Suggestion, SuggestionEngine};
use crate::validation::{IntegrityValidator, IssueKind, ValidationReport};

/// Configuration for loading and checking datasets.
#[derive(Debug, Clone)]
pub struct CrosscheckConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Hours an uploaded session stays alive.
    pub session_ttl_hours: i64,
}

impl CrosscheckConfig {
    /// Session lifetime as a duration.
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours)
    }
}

impl Default for CrosscheckConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
        }
    }
}

/// Validation report plus corrections for invalid keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    #[serde(flatten)]
    pub report: ValidationReport,
    /// Empty unless the report has `invalid_combination` errors.
    pub suggestions: Vec<Suggestion>,
    pub summary: CheckSummary,
}

/// Counts for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    pub errors: usize,
    pub warnings: usize,
    /// Issue counts keyed by wire name of the kind.
    pub by_kind: BTreeMap<String, usize>,
    /// Invalid rows with at least one candidate correction.
    pub correctable_rows: usize,
    /// Human-readable recommendation.
    pub recommendation: String,
}

/// A dataset read from disk or an upload, with its headers checked and
/// cells sanitized.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub kind: DatasetKind,
    pub dataset: Dataset,
    pub source: SourceMetadata,
}

/// Entry point tying parsing, validation, and suggestions together.
pub struct Crosscheck {
    config: CrosscheckConfig,
    parser: Parser,
    validator: IntegrityValidator,
}

impl Crosscheck {
    /// Create a Crosscheck instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(CrosscheckConfig::default())
    }

    /// Create a Crosscheck instance with custom configuration.
    pub fn with_config(config: CrosscheckConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self {
            config,
            parser,
            validator: IntegrityValidator::new(),
        }
    }

    /// Swap the integrity validator, e.g. for one with custom field checks.
    pub fn with_validator(mut self, validator: IntegrityValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn config(&self) -> &CrosscheckConfig {
        &self.config
    }

    /// Load a dataset file of `kind`.
    ///
    /// Fails with `InvalidHeaders` if the file lacks any expected column.
    pub fn load_file(&self, path: impl AsRef<Path>, kind: DatasetKind) -> Result<LoadedDataset> {
        let (table, source) = self.parser.parse_file(path)?;
        Self::finish_load(table.headers.clone(), table.to_rows(), source, kind)
    }

    /// Load an uploaded dataset of `kind` from memory.
    pub fn load_upload(&self, bytes: &[u8], file_name: &str, kind: DatasetKind) -> Result<LoadedDataset> {
        let (table, source) = self.parser.parse_named(bytes, file_name)?;
        Self::finish_load(table.headers.clone(), table.to_rows(), source, kind)
    }

    fn finish_load(
        headers: Vec<String>,
        rows: Vec<Row>,
        source: SourceMetadata,
        kind: DatasetKind,
    ) -> Result<LoadedDataset> {
        check_headers(&headers, kind).into_result(kind)?;

        let rows = sanitize_rows(&rows);
        let dataset = Dataset::new(headers, rows, source.file.clone());
        tracing::info!(%kind, file = %source.file, rows = dataset.row_count(), "loaded dataset");

        Ok(LoadedDataset {
            kind,
            dataset,
            source,
        })
    }

    /// Validate fact rows against reference rows and suggest corrections.
    pub fn check_rows(&self, fact_rows: &[Row], reference_rows: &[Row]) -> CheckResult {
        let (report, index) = self.validator.validate_with_index(fact_rows, reference_rows);

        let suggestions = if report.has_invalid_combinations() {
            SuggestionEngine::suggest(&report.errors, &index)
        } else {
            Vec::new()
        };

        let summary = Self::compute_summary(&report, &suggestions);
        CheckResult {
            report,
            suggestions,
            summary,
        }
    }

    /// Load both files and check them.
    pub fn check_files(
        &self,
        strings_path: impl AsRef<Path>,
        classifications_path: impl AsRef<Path>,
    ) -> Result<CheckResult> {
        let strings = self.load_file(strings_path, DatasetKind::Strings)?;
        let classifications = self.load_file(classifications_path, DatasetKind::Classifications)?;
        Ok(self.check_rows(&strings.dataset.rows, &classifications.dataset.rows))
    }

    fn compute_summary(report: &ValidationReport, suggestions: &[Suggestion]) -> CheckSummary {
        let mut by_kind = BTreeMap::new();
        for issue in report.errors.iter().chain(report.warnings.iter()) {
            *by_kind.entry(issue.kind.as_str().to_string()).or_insert(0) += 1;
        }

        let correctable_rows = suggestions.iter().filter(|s| s.best().is_some()).count();

        let recommendation = if report.is_valid && report.warnings.is_empty() {
            "All rows match the classifications - ready to export.".to_string()
        } else if report.is_valid {
            format!(
                "No blocking errors; review {} warning(s) before exporting.",
                report.warnings.len()
            )
        } else if correctable_rows > 0 {
            format!(
                "{} row(s) need fixing; {} have suggested corrections.",
                report.stats.invalid_count, correctable_rows
            )
        } else {
            format!("{} row(s) need fixing.", report.stats.invalid_count)
        };

        CheckSummary {
            errors: report.errors.len(),
            warnings: report.warnings.len(),
            by_kind,
            correctable_rows,
            recommendation,
        }
    }
}

impl Default for Crosscheck {
    fn default() -> Self {
        Self::new()
    }
}
