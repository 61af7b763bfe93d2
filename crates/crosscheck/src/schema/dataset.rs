//! The two dataset kinds and the columns each one must carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CrosscheckError;

/// Column names the validators address by name.
pub mod columns {
    pub const TIER: &str = "Tier";
    pub const INDUSTRY: &str = "Industry";
    pub const TOPIC: &str = "Topic";
    /// Subtopic column as spelled in the strings dataset.
    pub const SUBTOPIC: &str = "Subtopic";
    /// Subtopic column as spelled in the classifications dataset.
    pub const SUB_TOPIC: &str = "SubTopic";
    pub const PREFIX: &str = "Prefix";
    pub const FUZZING_IDX: &str = "Fuzzing-Idx";
    pub const PROMPT: &str = "Prompt";
    pub const RISKS: &str = "Risks";
    pub const KEYWORDS: &str = "Keywords";
    pub const CLASSIFICATION: &str = "Classification";
}

const STRINGS_HEADERS: &[&str] = &[
    columns::TIER,
    columns::INDUSTRY,
    columns::TOPIC,
    columns::SUBTOPIC,
    columns::PREFIX,
    columns::FUZZING_IDX,
    columns::PROMPT,
    columns::RISKS,
    columns::KEYWORDS,
];

const CLASSIFICATIONS_HEADERS: &[&str] = &[
    columns::TOPIC,
    columns::SUB_TOPIC,
    columns::INDUSTRY,
    columns::CLASSIFICATION,
];

/// Which of the two uploaded datasets a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// Fact rows ("strings").
    Strings,
    /// Reference rows ("classifications").
    Classifications,
}

impl DatasetKind {
    /// All kinds, in upload order.
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Strings, DatasetKind::Classifications];

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Strings => "strings",
            DatasetKind::Classifications => "classifications",
        }
    }

    /// Headers an upload of this kind must contain.
    pub fn expected_headers(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Strings => STRINGS_HEADERS,
            DatasetKind::Classifications => CLASSIFICATIONS_HEADERS,
        }
    }

    /// Fields that must be non-blank when a single row is edited.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Strings => &[
                columns::TIER,
                columns::INDUSTRY,
                columns::TOPIC,
                columns::SUBTOPIC,
            ],
            DatasetKind::Classifications => CLASSIFICATIONS_HEADERS,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = CrosscheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "strings" => Ok(DatasetKind::Strings),
            "classifications" => Ok(DatasetKind::Classifications),
            other => Err(CrosscheckError::UnknownDatasetKind(other.to_string())),
        }
    }
}

/// Outcome of comparing a file's headers to its kind's contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCheck {
    pub is_valid: bool,
    /// Expected columns the file lacks.
    pub missing: Vec<String>,
    /// Columns the file has beyond the contract. Never a failure.
    pub extra: Vec<String>,
}

impl HeaderCheck {
    /// Turn a failed check into an error naming the missing columns.
    pub fn into_result(self, kind: DatasetKind) -> crate::Result<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(CrosscheckError::InvalidHeaders {
                kind: kind.to_string(),
                missing: self.missing,
            })
        }
    }
}

/// Compare `headers` against what `kind` expects.
pub fn check_headers(headers: &[String], kind: DatasetKind) -> HeaderCheck {
    let expected = kind.expected_headers();

    let missing: Vec<String> = expected
        .iter()
        .filter(|e| !headers.iter().any(|h| h == *e))
        .map(|e| e.to_string())
        .collect();
    let extra: Vec<String> = headers
        .iter()
        .filter(|h| !expected.contains(&h.as_str()))
        .cloned()
        .collect();

    HeaderCheck {
        is_valid: missing.is_empty(),
        missing,
        extra,
    }
}
