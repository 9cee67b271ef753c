//! Rate limiter that admits everything.

use super::service::{RateLimitError, RateLimiter, RateLimits, RateScope};
use async_trait::async_trait;

/// Used when `ENABLE_RATE_LIMITS=false`.
#[derive(Debug, Default)]
pub struct NoopRateLimiter;

#[async_trait]
impl RateLimiter for NoopRateLimiter {
    async fn check(&self, _scope: RateScope, _client: &str) -> Result<(), RateLimitError> {
        Ok(())
    }

    fn limits(&self) -> Option<RateLimits> {
        None
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }
}
