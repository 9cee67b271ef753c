//! Redis-backed fixed-window rate limiter shared across instances.

use super::rule::RateRule;
use super::service::{RateLimitError, RateLimiter, RateLimits, RateScope};
use crate::infrastructure::cache::KEY_PREFIX;
use async_trait::async_trait;
use chrono::Utc;
use redis::aio::ConnectionManager;
use tracing::{debug, warn};

/// Counts requests per `(budget, client, window)` key with an atomic
/// `INCR` + `EXPIRE` pipeline.
///
/// Fail-open: a Redis error admits the request and logs a warning.
pub struct RedisRateLimiter {
    client: ConnectionManager,
    limits: RateLimits,
}

impl RedisRateLimiter {
    pub fn new(client: ConnectionManager, limits: RateLimits) -> Self {
        Self { client, limits }
    }

    /// Returns true when the request is within `rule`.
    async fn admit(&self, budget: &str, rule: RateRule, client: &str) -> bool {
        let window_secs = rule.window.duration().as_secs();
        let key = window_key(budget, client, window_secs, Utc::now().timestamp());
        let mut conn = self.client.clone();

        let counted: redis::RedisResult<(u64,)> = redis::pipe()
            .atomic()
            .incr(&key, 1u64)
            .expire(&key, window_secs as i64)
            .ignore()
            .query_async(&mut conn)
            .await;

        match counted {
            Ok((count,)) => {
                debug!(key = %key, count, "Rate counter");
                count <= u64::from(rule.requests.get())
            }
            Err(e) => {
                warn!("Redis rate limit error for {}: {}", key, e);
                true
            }
        }
    }
}

/// Key for the window containing `now` (unix seconds).
pub fn window_key(budget: &str, client: &str, window_secs: u64, now: i64) -> String {
    let window_index = now.max(0) as u64 / window_secs.max(1);
    format!("{KEY_PREFIX}ratelimit:{budget}:{client}:{window_index}")
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(&self, scope: RateScope, client: &str) -> Result<(), RateLimitError> {
        let scoped = self.limits.for_scope(scope);
        if !self.admit(&scope.to_string(), scoped, client).await {
            return Err(RateLimitError::Exceeded(scoped));
        }

        if !self.admit("daily", self.limits.daily, client).await {
            return Err(RateLimitError::Exceeded(self.limits.daily));
        }

        Ok(())
    }

    fn limits(&self) -> Option<RateLimits> {
        Some(self.limits)
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_key_groups_by_window() {
        let a = window_key("single", "10.0.0.1", 60, 1_700_000_000);
        let b = window_key("single", "10.0.0.1", 60, 1_700_000_019);
        let c = window_key("single", "10.0.0.1", 60, 1_700_000_040);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("domaincheck:ratelimit:single:10.0.0.1:"));
    }
}
