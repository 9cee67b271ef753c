//! Cached single-domain checks.

use crate::application::services::reconciliation::{ProbeTimeouts, ReconciliationEngine};
use crate::domain::entities::{Availability, DomainCheckResult, DomainQuery};
use crate::infrastructure::cache::CacheService;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// Hit/miss counters for the result cache.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Point-in-time copy of [`CacheStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStatsSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl CacheStats {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("cache_hits_total").increment(1);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("cache_misses_total").increment(1);
    }

    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            cache_hits: self.hits.load(Ordering::Relaxed),
            cache_misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Checks domains through the cache, probing only on a miss.
///
/// Two checks for the same key within the TTL return the same verdict and
/// probe outcomes; the second is marked `cached`. Concurrent misses for one
/// key may both probe; the last cache write wins.
pub struct CheckService {
    engine: ReconciliationEngine,
    cache: Arc<dyn CacheService>,
    timeouts: ProbeTimeouts,
    stats: CacheStats,
}

impl CheckService {
    pub fn new(
        engine: ReconciliationEngine,
        cache: Arc<dyn CacheService>,
        timeouts: ProbeTimeouts,
    ) -> Self {
        Self {
            engine,
            cache,
            timeouts,
            stats: CacheStats::default(),
        }
    }

    /// Returns the cached result for `query` or runs a fresh check.
    ///
    /// Cache failures are treated as misses; this never fails.
    pub async fn check(&self, query: &DomainQuery) -> DomainCheckResult {
        match self.cache.get(query).await {
            Ok(Some(stored)) => {
                self.stats.record_hit();
                return stored.as_cached();
            }
            Ok(None) => {}
            Err(e) => warn!("Cache lookup failed for {}: {}", query, e),
        }
        self.stats.record_miss();

        let result = self.engine.check(query, self.timeouts).await;

        let status = match result.overall_status() {
            Availability::Available => "available",
            Availability::Taken => "taken",
        };
        metrics::counter!("domain_checks_total", "status" => status).increment(1);

        if let Err(e) = self.cache.set(&result).await {
            warn!("Cache write failed for {}: {}", query, e);
        }

        result
    }

    pub fn cache_stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn cache(&self) -> &Arc<dyn CacheService> {
        &self.cache
    }

    pub fn timeouts(&self) -> ProbeTimeouts {
        self.timeouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ProbeDetail, ProbeOutcome};
    use crate::domain::probers::MockProber;
    use crate::infrastructure::cache::{CacheError, MemoryCache, MockCacheService};
    use std::time::Duration;

    fn counting_prober(outcome: ProbeOutcome, times: usize) -> MockProber {
        let mut mock = MockProber::new();
        mock.expect_probe()
            .times(times)
            .returning(move |_, _| outcome.clone());
        mock
    }

    fn service(cache: Arc<dyn CacheService>, probes: usize) -> CheckService {
        let engine = ReconciliationEngine::new(
            Arc::new(counting_prober(
                ProbeOutcome::taken(ProbeDetail::empty_whois(), Duration::ZERO),
                probes,
            )),
            Arc::new(counting_prober(
                ProbeOutcome::taken(
                    ProbeDetail::Dns {
                        records: vec!["192.0.2.1".to_string()],
                    },
                    Duration::ZERO,
                ),
                probes,
            )),
        );
        CheckService::new(engine, cache, ProbeTimeouts::default())
    }

    #[tokio::test]
    async fn test_second_check_is_served_from_cache() {
        let checker = service(Arc::new(MemoryCache::new(Duration::from_secs(300))), 1);
        let query = DomainQuery::parse("example", None).unwrap();

        let first = checker.check(&query).await;
        let second = checker.check(&query).await;

        assert!(!first.is_cached());
        assert!(second.is_cached());
        assert_eq!(first.overall_status(), second.overall_status());
        assert_eq!(first.whois(), second.whois());
        assert_eq!(first.dns(), second.dns());
        assert_eq!(
            checker.cache_stats(),
            CacheStatsSnapshot {
                cache_hits: 1,
                cache_misses: 1
            }
        );
    }

    #[tokio::test]
    async fn test_cache_errors_fall_back_to_probing() {
        let mut cache = MockCacheService::new();
        cache
            .expect_get()
            .times(1)
            .returning(|_| Err(CacheError::OperationError("boom".to_string())));
        cache
            .expect_set()
            .times(1)
            .returning(|_| Err(CacheError::OperationError("boom".to_string())));

        let checker = service(Arc::new(cache), 1);
        let query = DomainQuery::parse("example", None).unwrap();

        let result = checker.check(&query).await;

        assert_eq!(result.overall_status(), Availability::Taken);
        assert!(!result.is_cached());
        assert_eq!(checker.cache_stats().cache_misses, 1);
    }
}
