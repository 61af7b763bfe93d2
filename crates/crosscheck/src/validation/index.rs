//! Composite keys and the reference key index.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::issue::{Issue, IssueKind};
use crate::schema::{columns, Row, RowFields};

/// Delimiter for the joined form of a key. Not expected in source data.
pub const KEY_DELIMITER: char = '|';

/// The trimmed `(Topic, Subtopic, Industry)` triple joining the two datasets.
///
/// Comparison is case-sensitive and byte-exact on the trimmed values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeKey {
    #[serde(rename = "Topic")]
    pub topic: String,
    #[serde(rename = "Subtopic")]
    pub subtopic: String,
    #[serde(rename = "Industry")]
    pub industry: String,
}

impl CompositeKey {
    /// Build a key, trimming each part.
    pub fn new(
        topic: impl AsRef<str>,
        subtopic: impl AsRef<str>,
        industry: impl AsRef<str>,
    ) -> Self {
        Self {
            topic: topic.as_ref().trim().to_string(),
            subtopic: subtopic.as_ref().trim().to_string(),
            industry: industry.as_ref().trim().to_string(),
        }
    }

    /// Read the key out of a row, using `subtopic_column` for the middle part.
    ///
    /// Returns `None` if any part is blank.
    pub fn from_row(row: &Row, subtopic_column: &str) -> Option<Self> {
        let topic = row.trimmed(columns::TOPIC);
        let subtopic = row.trimmed(subtopic_column);
        let industry = row.trimmed(columns::INDUSTRY);

        if topic.is_empty() || subtopic.is_empty() || industry.is_empty() {
            return None;
        }

        Some(Self::new(topic, subtopic, industry))
    }

    /// Key of a fact ("strings") row.
    pub fn from_fact_row(row: &Row) -> Option<Self> {
        Self::from_row(row, columns::SUBTOPIC)
    }

    /// Key of a reference ("classifications") row.
    pub fn from_reference_row(row: &Row) -> Option<Self> {
        Self::from_row(row, columns::SUB_TOPIC)
    }

    /// `Topic|Subtopic|Industry`.
    pub fn joined(&self) -> String {
        format!(
            "{}{d}{}{d}{}",
            self.topic,
            self.subtopic,
            self.industry,
            d = KEY_DELIMITER
        )
    }

    /// Parts in field order.
    pub fn parts(&self) -> [&str; 3] {
        [
            self.topic.as_str(),
            self.subtopic.as_str(),
            self.industry.as_str(),
        ]
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// Set of valid keys, in the order reference rows first introduced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceKeyIndex {
    keys: IndexSet<CompositeKey>,
}

impl ReferenceKeyIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from reference rows.
    ///
    /// Rows missing any key part are skipped and reported as
    /// `incomplete_reference_row` warnings, in row order.
    pub fn build(reference_rows: &[Row]) -> (Self, Vec<Issue>) {
        let mut index = Self::new();
        let mut warnings = Vec::new();

        for (i, row) in reference_rows.iter().enumerate() {
            match CompositeKey::from_reference_row(row) {
                Some(key) => {
                    index.insert(key);
                }
                None => warnings.push(Issue::new(
                    IssueKind::IncompleteReferenceRow,
                    i + 1,
                    format!("Classification row {} has missing values", i + 1),
                    row,
                )),
            }
        }

        tracing::debug!(
            reference_rows = reference_rows.len(),
            index_size = index.len(),
            skipped = warnings.len(),
            "built reference key index"
        );

        (index, warnings)
    }

    /// Build the index, discarding warnings about incomplete rows.
    pub fn from_rows(reference_rows: &[Row]) -> Self {
        Self::build(reference_rows).0
    }

    /// Add a key. Returns false if it was already present.
    pub fn insert(&mut self, key: CompositeKey) -> bool {
        self.keys.insert(key)
    }

    pub fn contains(&self, key: &CompositeKey) -> bool {
        self.keys.contains(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CompositeKey> {
        self.keys.iter()
    }
}

impl FromIterator<CompositeKey> for ReferenceKeyIndex {
    fn from_iter<I: IntoIterator<Item = CompositeKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
