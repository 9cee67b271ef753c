//! Per-client rate limiting.
//!
//! Provides a [`RateLimiter`] trait with three implementations:
//! - [`MemoryRateLimiter`] - governor keyed limiters (single process)
//! - [`RedisRateLimiter`] - fixed windows in Redis (shared across instances)
//! - [`NoopRateLimiter`] - admits everything

mod memory_limiter;
mod noop_limiter;
mod redis_limiter;
mod rule;
mod service;

pub use memory_limiter::MemoryRateLimiter;
pub use noop_limiter::NoopRateLimiter;
pub use redis_limiter::{RedisRateLimiter, window_key};
pub use rule::{RateRule, RateRuleParseError, RateWindow};
pub use service::{RateLimitError, RateLimiter, RateLimits, RateScope};

#[cfg(test)]
pub use service::MockRateLimiter;
