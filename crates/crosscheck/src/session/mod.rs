//! Ephemeral per-user state between HTTP calls.
//!
//! The validator never touches a store; the server holds an
//! `Arc<dyn SessionStore>` and passes row sets out of it.
//!
//! ```
//! use crosscheck::session::{Dataset, MemorySessionStore, SessionStore};
//! use crosscheck::DatasetKind;
//!
//! let store = MemorySessionStore::new();
//! let id = store.create();
//! store
//!     .put_dataset(&id, DatasetKind::Strings, Dataset::new(vec!["Topic".into()], vec![], "strings.csv"))
//!     .unwrap();
//! assert_eq!(store.dataset(&id, DatasetKind::Strings).unwrap().rows.len(), 0);
//! ```

mod memory;
mod store;

pub use memory::{MemorySessionStore, DEFAULT_SESSION_TTL_HOURS};
pub use store::{Dataset, Session, SessionId, SessionStats, SessionStore, SessionSummary};
