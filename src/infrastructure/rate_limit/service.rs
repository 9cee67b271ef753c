//! Rate limiter trait and shared types.

use super::rule::RateRule;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which endpoint budget a request draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateScope {
    Single,
    Bulk,
}

impl fmt::Display for RateScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Single => "single",
            Self::Bulk => "bulk",
        })
    }
}

/// Configured budgets. `daily` is shared by both scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimits {
    pub single: RateRule,
    pub bulk: RateRule,
    pub daily: RateRule,
}

impl RateLimits {
    pub fn for_scope(&self, scope: RateScope) -> RateRule {
        match scope {
            RateScope::Single => self.single,
            RateScope::Bulk => self.bulk,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("{0}")]
    Exceeded(RateRule),
}

/// Per-client admission control.
///
/// Implementations provide their own atomic increment-and-check; callers
/// never lock around [`RateLimiter::check`].
///
/// # Implementations
///
/// - [`crate::infrastructure::rate_limit::MemoryRateLimiter`] - governor GCRA, per process
/// - [`crate::infrastructure::rate_limit::RedisRateLimiter`] - fixed windows in Redis, shared
/// - [`crate::infrastructure::rate_limit::NoopRateLimiter`] - `ENABLE_RATE_LIMITS=false`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Admits or rejects one request from `client` against the scope budget
    /// and the shared daily budget.
    ///
    /// The scope budget is charged first and the daily budget only once the
    /// scope admits. A scope rejection therefore never spends a daily cell;
    /// a daily rejection does spend a scope cell, which refills within its
    /// window.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::Exceeded`] naming the rule that rejected the request.
    async fn check(&self, scope: RateScope, client: &str) -> Result<(), RateLimitError>;

    /// Configured budgets, `None` when limiting is disabled.
    fn limits(&self) -> Option<RateLimits>;

    /// Short backend name reported on `/metrics`.
    fn backend(&self) -> &'static str;
}
