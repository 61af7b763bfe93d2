//! Application state for the web server.

use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crosscheck::{Crosscheck, MemorySessionStore, SessionStore};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

/// Window over which the per-client request budget applies.
pub const RATE_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Requests a client may make to `/api/csv` per window by default.
pub const DEFAULT_RATE_LIMIT: u32 = 1000;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Uploaded datasets, keyed by session id.
    pub store: Arc<dyn SessionStore>,
    /// Parser, validator and suggestion engine.
    pub crosscheck: Arc<Crosscheck>,
    /// Per-client request budget for the API routes.
    pub limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
}

impl AppState {
    /// Create new application state with the default request budget.
    pub fn new(store: Arc<dyn SessionStore>, crosscheck: Arc<Crosscheck>) -> Self {
        let requests = NonZeroU32::new(DEFAULT_RATE_LIMIT).unwrap_or(NonZeroU32::MIN);
        Self {
            store,
            crosscheck,
            limiter: Arc::new(RateLimiter::keyed(rate_quota(requests))),
        }
    }

    /// Replace the request budget with `requests` per [`RATE_WINDOW`].
    pub fn with_rate_limit(mut self, requests: NonZeroU32) -> Self {
        self.limiter = Arc::new(RateLimiter::keyed(rate_quota(requests)));
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            Arc::new(MemorySessionStore::new()),
            Arc::new(Crosscheck::new()),
        )
    }
}

/// `requests` per window, all of which may be spent at once.
fn rate_quota(requests: NonZeroU32) -> Quota {
    Quota::with_period(RATE_WINDOW / requests.get())
        .unwrap_or_else(|| Quota::per_second(requests))
        .allow_burst(requests)
}
