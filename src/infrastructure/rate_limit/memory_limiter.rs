//! In-process rate limiter built on governor's keyed GCRA limiters.

use super::rule::RateRule;
use super::service::{RateLimitError, RateLimiter, RateLimits, RateScope};
use async_trait::async_trait;
use governor::{DefaultKeyedRateLimiter, Quota};
use tracing::debug;

/// Keeps one keyed limiter per budget; keys are client identities.
///
/// A rule of `N per window` becomes a quota replenishing one cell every
/// `window / N` with a burst of `N`, so a fresh client can spend the whole
/// budget at once and then regains it gradually.
pub struct MemoryRateLimiter {
    limits: RateLimits,
    single: DefaultKeyedRateLimiter<String>,
    bulk: DefaultKeyedRateLimiter<String>,
    daily: DefaultKeyedRateLimiter<String>,
}

impl MemoryRateLimiter {
    pub fn new(limits: RateLimits) -> Self {
        Self {
            limits,
            single: DefaultKeyedRateLimiter::keyed(quota(limits.single)),
            bulk: DefaultKeyedRateLimiter::keyed(quota(limits.bulk)),
            daily: DefaultKeyedRateLimiter::keyed(quota(limits.daily)),
        }
    }

    /// Drops state for clients whose budgets are fully replenished.
    pub fn retain_recent(&self) {
        self.single.retain_recent();
        self.bulk.retain_recent();
        self.daily.retain_recent();
    }
}

fn quota(rule: RateRule) -> Quota {
    let period = rule.window.duration() / rule.requests.get();
    Quota::with_period(period)
        .unwrap_or_else(|| Quota::per_second(rule.requests))
        .allow_burst(rule.requests)
}

#[async_trait]
impl RateLimiter for MemoryRateLimiter {
    async fn check(&self, scope: RateScope, client: &str) -> Result<(), RateLimitError> {
        let key = client.to_string();

        let scoped = match scope {
            RateScope::Single => &self.single,
            RateScope::Bulk => &self.bulk,
        };

        if scoped.check_key(&key).is_err() {
            debug!(client, %scope, "Rate limit hit");
            return Err(RateLimitError::Exceeded(self.limits.for_scope(scope)));
        }

        // Only charged once the scope admits; see `RateLimiter::check`.
        if self.daily.check_key(&key).is_err() {
            debug!(client, "Daily rate limit hit");
            return Err(RateLimitError::Exceeded(self.limits.daily));
        }

        Ok(())
    }

    fn limits(&self) -> Option<RateLimits> {
        Some(self.limits)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(single: &str, bulk: &str, daily: &str) -> RateLimits {
        RateLimits {
            single: single.parse().unwrap(),
            bulk: bulk.parse().unwrap(),
            daily: daily.parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_rejects_after_scope_budget() {
        let limiter = MemoryRateLimiter::new(limits("2 per minute", "1 per minute", "100 per day"));

        assert!(limiter.check(RateScope::Single, "10.0.0.1").await.is_ok());
        assert!(limiter.check(RateScope::Single, "10.0.0.1").await.is_ok());

        let err = limiter
            .check(RateScope::Single, "10.0.0.1")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "2 per minute");
    }

    #[tokio::test]
    async fn test_clients_have_separate_budgets() {
        let limiter = MemoryRateLimiter::new(limits("1 per minute", "1 per minute", "100 per day"));

        assert!(limiter.check(RateScope::Single, "10.0.0.1").await.is_ok());
        assert!(limiter.check(RateScope::Single, "10.0.0.2").await.is_ok());
        assert!(limiter.check(RateScope::Single, "10.0.0.1").await.is_err());
    }

    #[tokio::test]
    async fn test_scopes_are_independent_but_share_daily() {
        let limiter = MemoryRateLimiter::new(limits("5 per minute", "5 per minute", "2 per day"));

        assert!(limiter.check(RateScope::Single, "client").await.is_ok());
        assert!(limiter.check(RateScope::Bulk, "client").await.is_ok());

        let err = limiter.check(RateScope::Bulk, "client").await.unwrap_err();
        assert_eq!(err, RateLimitError::Exceeded("2 per day".parse().unwrap()));
    }

    #[tokio::test]
    async fn test_scope_rejection_leaves_daily_budget_untouched() {
        let limiter = MemoryRateLimiter::new(limits("1 per minute", "5 per minute", "2 per day"));

        assert!(limiter.check(RateScope::Single, "client").await.is_ok());
        for _ in 0..3 {
            let err = limiter.check(RateScope::Single, "client").await.unwrap_err();
            assert_eq!(err, RateLimitError::Exceeded("1 per minute".parse().unwrap()));
        }

        // One daily cell left despite the rejected single requests.
        assert!(limiter.check(RateScope::Bulk, "client").await.is_ok());
        let err = limiter.check(RateScope::Bulk, "client").await.unwrap_err();
        assert_eq!(err, RateLimitError::Exceeded("2 per day".parse().unwrap()));
    }
}
