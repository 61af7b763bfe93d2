//! Session data types and the store interface.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::{DatasetKind, Row};

/// Opaque session identifier (a UUID string).
pub type SessionId = String;

/// One uploaded dataset and its editing history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub headers: Vec<String>,
    #[serde(rename = "data")]
    pub rows: Vec<Row>,
    pub original_file_name: String,
    pub upload_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_modified: Option<DateTime<Utc>>,
}

impl Dataset {
    /// A dataset uploaded now.
    pub fn new(headers: Vec<String>, rows: Vec<Row>, original_file_name: impl Into<String>) -> Self {
        Self {
            headers,
            rows,
            original_file_name: original_file_name.into(),
            upload_time: Utc::now(),
            last_modified: None,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// All datasets uploaded under one id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub datasets: BTreeMap<DatasetKind, Dataset>,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            datasets: BTreeMap::new(),
        }
    }

    /// A session expires once any of its datasets was uploaded more than
    /// `ttl` ago. A session with no datasets ages from its creation time.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        if self.datasets.is_empty() {
            return now - self.created_at > ttl;
        }
        self.datasets.values().any(|d| now - d.upload_time > ttl)
    }
}

/// Per-session counts for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub file_types: Vec<DatasetKind>,
    pub counts: BTreeMap<DatasetKind, usize>,
}

/// Store-wide counts for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub total_sessions: usize,
    pub sessions: BTreeMap<SessionId, SessionSummary>,
}

/// Key-value store of sessions with time-based eviction.
pub trait SessionStore: Send + Sync {
    /// Open a new empty session and return its id.
    fn create(&self) -> SessionId;

    /// Snapshot of a whole session.
    fn session(&self, id: &str) -> Result<Session>;

    /// Store (or replace) the dataset of `kind` in a session.
    fn put_dataset(&self, id: &str, kind: DatasetKind, dataset: Dataset) -> Result<()>;

    /// Copy of the dataset of `kind`.
    fn dataset(&self, id: &str, kind: DatasetKind) -> Result<Dataset>;

    /// Replace the rows of an existing dataset. Returns the modification time.
    fn update_rows(&self, id: &str, kind: DatasetKind, rows: Vec<Row>) -> Result<DateTime<Utc>>;

    /// Drop a session. Returns false if it did not exist.
    fn remove(&self, id: &str) -> bool;

    /// Drop every session expired at `now`. Returns how many were dropped.
    fn purge_expired(&self, now: DateTime<Utc>) -> usize;

    fn stats(&self) -> SessionStats;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_uses_oldest_upload() {
        let now = Utc::now();
        let mut session = Session::new("s".to_string());
        session.created_at = now;

        let mut old = Dataset::new(vec![], vec![], "strings.csv");
        old.upload_time = now - Duration::hours(25);
        let fresh = Dataset::new(vec![], vec![], "classifications.csv");

        session.datasets.insert(DatasetKind::Classifications, fresh);
        assert!(!session.is_expired(now, Duration::hours(24)));

        session.datasets.insert(DatasetKind::Strings, old);
        assert!(session.is_expired(now, Duration::hours(24)));
    }

    #[test]
    fn test_empty_session_ages_from_creation() {
        let now = Utc::now();
        let mut session = Session::new("s".to_string());
        session.created_at = now - Duration::hours(2);
        assert!(!session.is_expired(now, Duration::hours(24)));
        assert!(session.is_expired(now, Duration::hours(1)));
    }

    #[test]
    fn test_dataset_wire_names() {
        let dataset = Dataset::new(vec!["Topic".to_string()], vec![], "c.csv");
        let json = serde_json::to_value(&dataset).unwrap();
        assert!(json.get("data").is_some());
        assert_eq!(json["originalFileName"], "c.csv");
        assert!(json.get("uploadTime").is_some());
        assert!(json.get("lastModified").is_none());
    }
}
