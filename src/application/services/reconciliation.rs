//! Dual-source reconciliation engine.

use crate::domain::entities::{DomainCheckResult, DomainQuery, ProbeDetail, ProbeOutcome};
use crate::domain::probers::Prober;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Per-prober time bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTimeouts {
    pub whois: Duration,
    pub dns: Duration,
}

impl Default for ProbeTimeouts {
    fn default() -> Self {
        Self {
            whois: Duration::from_secs(5),
            dns: Duration::from_secs(3),
        }
    }
}

/// Runs WHOIS and DNS probes concurrently and reduces them to one verdict.
///
/// Each probe is bounded by its own timeout here as well as inside the
/// prober, so a misbehaving prober cannot hold a check past
/// `max(whois, dns)`. No retries: a failed probe is reported as is and the
/// tie-break policy decides.
pub struct ReconciliationEngine {
    whois: Arc<dyn Prober>,
    dns: Arc<dyn Prober>,
}

impl ReconciliationEngine {
    pub fn new(whois: Arc<dyn Prober>, dns: Arc<dyn Prober>) -> Self {
        Self { whois, dns }
    }

    /// Checks one query against both sources.
    pub async fn check(&self, query: &DomainQuery, timeouts: ProbeTimeouts) -> DomainCheckResult {
        let started = Instant::now();

        let (whois, dns) = tokio::join!(
            bounded(
                self.whois.as_ref(),
                query,
                timeouts.whois,
                ProbeDetail::empty_whois()
            ),
            bounded(self.dns.as_ref(), query, timeouts.dns, ProbeDetail::empty_dns()),
        );

        let result = DomainCheckResult::new(query.clone(), whois, dns, started.elapsed());

        debug!(
            domain = %query,
            whois = ?result.whois().status,
            dns = ?result.dns().status,
            overall = ?result.overall_status(),
            elapsed_ms = result.elapsed().as_millis() as u64,
            "Domain reconciled"
        );

        result
    }
}

async fn bounded(
    prober: &dyn Prober,
    query: &DomainQuery,
    timeout: Duration,
    empty: ProbeDetail,
) -> ProbeOutcome {
    let started = Instant::now();
    match tokio::time::timeout(timeout, prober.probe(query, timeout)).await {
        Ok(outcome) => outcome,
        Err(_) => ProbeOutcome::timeout(empty, started.elapsed()),
    }
}
