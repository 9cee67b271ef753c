//! Shared application state injected into handlers and middleware.

use crate::application::services::{BulkService, CheckService};
use crate::infrastructure::rate_limit::RateLimiter;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<CheckService>,
    pub bulk: Arc<BulkService>,
    pub limiter: Arc<dyn RateLimiter>,
    /// Reported on `/metrics`.
    pub cache_ttl: Duration,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        checker: Arc<CheckService>,
        bulk: Arc<BulkService>,
        limiter: Arc<dyn RateLimiter>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            checker,
            bulk,
            limiter,
            cache_ttl,
            started_at: Instant::now(),
        }
    }
}
