//! Probe outcome entity produced by a single WHOIS or DNS lookup.

use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;

/// Verdict of one prober.
///
/// `Error` and `Timeout` are both inconclusive; `Timeout` only records why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Available,
    Taken,
    Error,
    Timeout,
}

impl ProbeStatus {
    /// Returns true for `Error` and `Timeout`.
    pub fn is_inconclusive(self) -> bool {
        matches!(self, Self::Error | Self::Timeout)
    }
}

/// Prober-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ProbeDetail {
    Whois {
        registrar: Option<String>,
        expiration_date: Option<String>,
    },
    Dns {
        records: Vec<String>,
    },
}

impl ProbeDetail {
    /// WHOIS payload with no extracted fields.
    pub fn empty_whois() -> Self {
        Self::Whois {
            registrar: None,
            expiration_date: None,
        }
    }

    /// DNS payload with no records.
    pub fn empty_dns() -> Self {
        Self::Dns {
            records: Vec::new(),
        }
    }
}

/// Result of a single probe call.
///
/// Created once by a prober and never shared between checks.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub status: ProbeStatus,
    pub detail: ProbeDetail,
    /// Human-readable failure reason for `Error` and `Timeout`.
    pub error: Option<String>,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub latency: Duration,
}

impl ProbeOutcome {
    pub fn available(detail: ProbeDetail, latency: Duration) -> Self {
        Self {
            status: ProbeStatus::Available,
            detail,
            error: None,
            latency,
        }
    }

    pub fn taken(detail: ProbeDetail, latency: Duration) -> Self {
        Self {
            status: ProbeStatus::Taken,
            detail,
            error: None,
            latency,
        }
    }

    pub fn error(detail: ProbeDetail, message: impl Into<String>, latency: Duration) -> Self {
        Self {
            status: ProbeStatus::Error,
            detail,
            error: Some(message.into()),
            latency,
        }
    }

    pub fn timeout(detail: ProbeDetail, latency: Duration) -> Self {
        Self {
            status: ProbeStatus::Timeout,
            detail,
            error: Some("timeout".to_string()),
            latency,
        }
    }
}
