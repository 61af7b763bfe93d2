//! In-process session store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::store::{Dataset, Session, SessionId, SessionStats, SessionStore, SessionSummary};
use crate::error::{CrosscheckError, Result};
use crate::schema::{DatasetKind, Row};

/// Sessions older than this are purged.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Sessions held in memory behind a read-write lock.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
    ttl: Duration,
}

impl MemorySessionStore {
    /// Store with the default 24 hour TTL.
    pub fn new() -> Self {
        Self::with_ttl(Duration::hours(DEFAULT_SESSION_TTL_HOURS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn with_session<T>(&self, id: &str, f: impl FnOnce(&Session) -> Result<T>) -> Result<T> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        let session = sessions
            .get(id)
            .ok_or_else(|| CrosscheckError::SessionNotFound(id.to_string()))?;
        f(session)
    }

    fn with_session_mut<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Session) -> Result<T>,
    ) -> Result<T> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| CrosscheckError::SessionNotFound(id.to_string()))?;
        f(session)
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn dataset_not_found(id: &str, kind: DatasetKind) -> CrosscheckError {
    CrosscheckError::DatasetNotFound {
        session: id.to_string(),
        kind: kind.to_string(),
    }
}

impl SessionStore for MemorySessionStore {
    fn create(&self) -> SessionId {
        let id = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), Session::new(id.clone()));
        tracing::debug!(session = %id, "created session");
        id
    }

    fn session(&self, id: &str) -> Result<Session> {
        self.with_session(id, |s| Ok(s.clone()))
    }

    fn put_dataset(&self, id: &str, kind: DatasetKind, dataset: Dataset) -> Result<()> {
        self.with_session_mut(id, |s| {
            tracing::debug!(session = %id, %kind, rows = dataset.row_count(), "stored dataset");
            s.datasets.insert(kind, dataset);
            Ok(())
        })
    }

    fn dataset(&self, id: &str, kind: DatasetKind) -> Result<Dataset> {
        self.with_session(id, |s| {
            s.datasets
                .get(&kind)
                .cloned()
                .ok_or_else(|| dataset_not_found(id, kind))
        })
    }

    fn update_rows(&self, id: &str, kind: DatasetKind, rows: Vec<Row>) -> Result<DateTime<Utc>> {
        self.with_session_mut(id, |s| {
            let dataset = s
                .datasets
                .get_mut(&kind)
                .ok_or_else(|| dataset_not_found(id, kind))?;
            let now = Utc::now();
            dataset.rows = rows;
            dataset.last_modified = Some(now);
            tracing::debug!(session = %id, %kind, rows = dataset.row_count(), "updated dataset");
            Ok(now)
        })
    }

    fn remove(&self, id: &str) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some();
        if removed {
            tracing::debug!(session = %id, "removed session");
        }
        removed
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now, self.ttl));
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::info!(purged, remaining = sessions.len(), "purged expired sessions");
        }
        purged
    }

    fn stats(&self) -> SessionStats {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        SessionStats {
            total_sessions: sessions.len(),
            sessions: sessions
                .iter()
                .map(|(id, s)| {
                    let summary = SessionSummary {
                        file_types: s.datasets.keys().copied().collect(),
                        counts: s.datasets.iter().map(|(k, d)| (*k, d.row_count())).collect(),
                    };
                    (id.clone(), summary)
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn dataset(rows: Vec<Row>) -> Dataset {
        Dataset::new(vec!["Topic".to_string()], rows, "upload.csv")
    }

    #[test]
    fn test_create_and_fetch() {
        let store = MemorySessionStore::new();
        let id = store.create();
        assert!(Uuid::parse_str(&id).is_ok());

        store
            .put_dataset(&id, DatasetKind::Strings, dataset(vec![row(&[("Topic", "A")])]))
            .unwrap();

        let fetched = store.dataset(&id, DatasetKind::Strings).unwrap();
        assert_eq!(fetched.rows[0]["Topic"], "A");
        assert!(matches!(
            store.dataset(&id, DatasetKind::Classifications),
            Err(CrosscheckError::DatasetNotFound { .. })
        ));
    }

    #[test]
    fn test_unknown_session() {
        let store = MemorySessionStore::new();
        assert!(matches!(
            store.session("nope"),
            Err(CrosscheckError::SessionNotFound(_))
        ));
        assert!(store
            .put_dataset("nope", DatasetKind::Strings, dataset(vec![]))
            .is_err());
        assert!(!store.remove("nope"));
    }

    #[test]
    fn test_update_rows_sets_last_modified() {
        let store = MemorySessionStore::new();
        let id = store.create();
        store
            .put_dataset(&id, DatasetKind::Strings, dataset(vec![]))
            .unwrap();

        let modified = store
            .update_rows(&id, DatasetKind::Strings, vec![row(&[("Topic", "B")])])
            .unwrap();

        let fetched = store.dataset(&id, DatasetKind::Strings).unwrap();
        assert_eq!(fetched.row_count(), 1);
        assert_eq!(fetched.last_modified, Some(modified));
        assert!(store
            .update_rows(&id, DatasetKind::Classifications, vec![])
            .is_err());
    }

    #[test]
    fn test_purge_expired() {
        let store = MemorySessionStore::with_ttl(Duration::hours(24));
        let old = store.create();
        let fresh = store.create();

        let mut stale = dataset(vec![]);
        stale.upload_time = Utc::now() - Duration::hours(30);
        store.put_dataset(&old, DatasetKind::Strings, stale).unwrap();
        store
            .put_dataset(&fresh, DatasetKind::Strings, dataset(vec![]))
            .unwrap();

        assert_eq!(store.purge_expired(Utc::now()), 1);
        assert!(store.session(&old).is_err());
        assert!(store.session(&fresh).is_ok());
    }

    #[test]
    fn test_stats_and_remove() {
        let store = MemorySessionStore::new();
        let id = store.create();
        store
            .put_dataset(&id, DatasetKind::Classifications, dataset(vec![Row::new(), Row::new()]))
            .unwrap();

        let stats = store.stats();
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.sessions[&id].counts[&DatasetKind::Classifications], 2);

        assert!(store.remove(&id));
        assert_eq!(store.stats().total_sessions, 0);
    }
}
