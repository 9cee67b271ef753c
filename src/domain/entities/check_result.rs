//! Reconciled check result for one domain.

use crate::domain::entities::{DomainQuery, ProbeOutcome};
use crate::domain::policy::reconcile;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;

/// Overall availability verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Taken,
}

/// Outcome of checking one domain against both probers.
///
/// `overall_status` is derived from the two probe statuses in [`Self::new`]
/// and has no setter. The cache stores this value verbatim; a replay only
/// flips `cached` via [`Self::as_cached`].
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCheckResult {
    query: DomainQuery,
    overall_status: Availability,
    whois: ProbeOutcome,
    dns: ProbeOutcome,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    elapsed: Duration,
    cached: bool,
}

impl DomainCheckResult {
    /// Builds a fresh (uncached) result, applying the tie-break policy.
    pub fn new(
        query: DomainQuery,
        whois: ProbeOutcome,
        dns: ProbeOutcome,
        elapsed: Duration,
    ) -> Self {
        let overall_status = reconcile(whois.status, dns.status);
        Self {
            query,
            overall_status,
            whois,
            dns,
            elapsed,
            cached: false,
        }
    }

    /// Returns a copy marked as served from cache.
    pub fn as_cached(&self) -> Self {
        Self {
            cached: true,
            ..self.clone()
        }
    }

    pub fn query(&self) -> &DomainQuery {
        &self.query
    }

    pub fn overall_status(&self) -> Availability {
        self.overall_status
    }

    pub fn whois(&self) -> &ProbeOutcome {
        &self.whois
    }

    pub fn dns(&self) -> &ProbeOutcome {
        &self.dns
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_cached(&self) -> bool {
        self.cached
    }
}
