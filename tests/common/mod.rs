#![allow(dead_code)]

use async_trait::async_trait;
use domain_checker::application::services::{
    BulkService, CheckService, ProbeTimeouts, ReconciliationEngine,
};
use domain_checker::domain::entities::{DomainQuery, ProbeDetail, ProbeOutcome};
use domain_checker::domain::probers::Prober;
use domain_checker::infrastructure::cache::{CacheService, MemoryCache, NullCache};
use domain_checker::infrastructure::rate_limit::{NoopRateLimiter, RateLimiter};
use domain_checker::state::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const TEST_CACHE_TTL: Duration = Duration::from_secs(300);

/// Which payload a fake prober reports.
#[derive(Debug, Clone, Copy)]
pub enum Source {
    Whois,
    Dns,
}

/// Always returns the same verdict and counts calls.
pub struct FixedProber {
    source: Source,
    verdict: Verdict,
    calls: AtomicUsize,
}

#[derive(Debug, Clone, Copy)]
pub enum Verdict {
    Available,
    Taken,
    Error,
}

impl FixedProber {
    pub fn new(source: Source, verdict: Verdict) -> Arc<Self> {
        Arc::new(Self {
            source,
            verdict,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for FixedProber {
    async fn probe(&self, _query: &DomainQuery, _timeout: Duration) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        outcome(self.source, self.verdict)
    }
}

pub fn outcome(source: Source, verdict: Verdict) -> ProbeOutcome {
    let latency = Duration::from_millis(5);
    match (source, verdict) {
        (Source::Whois, Verdict::Available) => {
            ProbeOutcome::available(ProbeDetail::empty_whois(), latency)
        }
        (Source::Whois, Verdict::Taken) => ProbeOutcome::taken(
            ProbeDetail::Whois {
                registrar: Some("Example Registrar, Inc.".to_string()),
                expiration_date: Some("2030-01-01".to_string()),
            },
            latency,
        ),
        (Source::Whois, Verdict::Error) => {
            ProbeOutcome::error(ProbeDetail::empty_whois(), "connection refused", latency)
        }
        (Source::Dns, Verdict::Available) => {
            ProbeOutcome::available(ProbeDetail::empty_dns(), latency)
        }
        (Source::Dns, Verdict::Taken) => ProbeOutcome::taken(
            ProbeDetail::Dns {
                records: vec!["192.0.2.10".to_string()],
            },
            latency,
        ),
        (Source::Dns, Verdict::Error) => {
            ProbeOutcome::error(ProbeDetail::empty_dns(), "SERVFAIL", latency)
        }
    }
}

/// Sleeps for a per-label delay, then reports the label as available.
///
/// Labels like `slow300` sleep 300 ms; anything else answers immediately.
pub struct DelayedProber {
    source: Source,
    calls: AtomicUsize,
}

impl DelayedProber {
    pub fn new(source: Source) -> Arc<Self> {
        Arc::new(Self {
            source,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for DelayedProber {
    async fn probe(&self, query: &DomainQuery, _timeout: Duration) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = query
            .domain()
            .strip_prefix("slow")
            .and_then(|ms| ms.parse().ok())
            .unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        outcome(self.source, Verdict::Available)
    }
}

/// Holds each probe for a fixed delay and records the peak number in flight.
pub struct GaugeProber {
    source: Source,
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl GaugeProber {
    pub fn new(source: Source, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            source,
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        })
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for GaugeProber {
    async fn probe(&self, _query: &DomainQuery, _timeout: Duration) -> ProbeOutcome {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome(self.source, Verdict::Available)
    }
}

/// Never answers; only a timeout ends the probe.
pub struct HangingProber;

#[async_trait]
impl Prober for HangingProber {
    async fn probe(&self, _query: &DomainQuery, _timeout: Duration) -> ProbeOutcome {
        std::future::pending::<ProbeOutcome>().await
    }
}

pub struct TestStateBuilder {
    whois: Arc<dyn Prober>,
    dns: Arc<dyn Prober>,
    cache: Arc<dyn CacheService>,
    limiter: Arc<dyn RateLimiter>,
    timeouts: ProbeTimeouts,
    max_bulk_domains: usize,
    bulk_concurrency: usize,
}

impl TestStateBuilder {
    pub fn new(whois: Arc<dyn Prober>, dns: Arc<dyn Prober>) -> Self {
        Self {
            whois,
            dns,
            cache: Arc::new(NullCache::new()),
            limiter: Arc::new(NoopRateLimiter),
            timeouts: ProbeTimeouts::default(),
            max_bulk_domains: 10,
            bulk_concurrency: 5,
        }
    }

    pub fn memory_cache(mut self) -> Self {
        self.cache = Arc::new(MemoryCache::new(TEST_CACHE_TTL));
        self
    }

    pub fn limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn timeouts(mut self, whois: Duration, dns: Duration) -> Self {
        self.timeouts = ProbeTimeouts { whois, dns };
        self
    }

    pub fn max_bulk_domains(mut self, max: usize) -> Self {
        self.max_bulk_domains = max;
        self
    }

    pub fn bulk_concurrency(mut self, concurrency: usize) -> Self {
        self.bulk_concurrency = concurrency;
        self
    }

    pub fn build(self) -> AppState {
        let engine = ReconciliationEngine::new(self.whois, self.dns);
        let checker = Arc::new(CheckService::new(engine, self.cache, self.timeouts));
        let bulk = Arc::new(BulkService::new(
            checker.clone(),
            self.max_bulk_domains,
            self.bulk_concurrency,
        ));

        AppState::new(checker, bulk, self.limiter, TEST_CACHE_TTL)
    }
}

/// State with fixed verdicts, no cache and no rate limits.
pub fn create_test_state(whois: Verdict, dns: Verdict) -> AppState {
    TestStateBuilder::new(
        FixedProber::new(Source::Whois, whois),
        FixedProber::new(Source::Dns, dns),
    )
    .build()
}
