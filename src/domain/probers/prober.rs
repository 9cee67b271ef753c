//! Prober trait shared by WHOIS and DNS lookups.

use crate::domain::entities::{DomainQuery, ProbeOutcome};
use async_trait::async_trait;
use std::time::Duration;

/// A single availability signal source.
///
/// Probers never fail: timeouts, transport errors and unknown upstreams are
/// reported through [`ProbeOutcome::status`] so the reconciliation engine can
/// still produce a verdict from the other source.
///
/// # Implementations
///
/// - [`crate::infrastructure::whois::WhoisProber`] - WHOIS over TCP port 43
/// - [`crate::infrastructure::dns::DnsProber`] - A/AAAA resolution via hickory
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probes `query`, giving up after `timeout`.
    ///
    /// Implementations must return within `timeout` (plus scheduling slack)
    /// and report the overrun as [`crate::domain::entities::ProbeStatus::Timeout`].
    async fn probe(&self, query: &DomainQuery, timeout: Duration) -> ProbeOutcome;
}
