//! DTOs for the single domain check endpoint.

use crate::domain::entities::{
    Availability, DomainCheckResult, ProbeDetail, ProbeOutcome, ProbeStatus,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Query string of `GET /`.
///
/// Both fields are optional at the HTTP level so a missing `domain` is
/// reported as a domain error rather than a generic deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckParams {
    #[validate(length(max = 253, message = "Domain parameter is too long"))]
    pub domain: Option<String>,

    #[validate(length(max = 64, message = "TLD parameter is too long"))]
    pub tld: Option<String>,
}

/// Probe status as reported to clients. Timeouts are folded into `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportedStatus {
    Available,
    Taken,
    Error,
}

impl From<ProbeStatus> for ReportedStatus {
    fn from(status: ProbeStatus) -> Self {
        match status {
            ProbeStatus::Available => Self::Available,
            ProbeStatus::Taken => Self::Taken,
            ProbeStatus::Error | ProbeStatus::Timeout => Self::Error,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct WhoisDetails {
    pub registrar: Option<String>,
    pub expiration_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WhoisReport {
    pub status: ReportedStatus,
    pub details: WhoisDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ProbeOutcome> for WhoisReport {
    fn from(outcome: &ProbeOutcome) -> Self {
        let details = match &outcome.detail {
            ProbeDetail::Whois {
                registrar,
                expiration_date,
            } => WhoisDetails {
                registrar: registrar.clone(),
                expiration_date: expiration_date.clone(),
            },
            ProbeDetail::Dns { .. } => WhoisDetails::default(),
        };

        Self {
            status: outcome.status.into(),
            details,
            error: outcome.error.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DnsReport {
    pub status: ReportedStatus,
    pub records: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ProbeOutcome> for DnsReport {
    fn from(outcome: &ProbeOutcome) -> Self {
        let records = match &outcome.detail {
            ProbeDetail::Dns { records } => records.clone(),
            ProbeDetail::Whois { .. } => Vec::new(),
        };

        Self {
            status: outcome.status.into(),
            records,
            error: outcome.error.clone(),
        }
    }
}

/// Response of `GET /` and one checked item of `POST /bulk`.
#[derive(Debug, Serialize)]
pub struct DomainCheckResponse {
    /// Full name, `label.tld`.
    pub domain: String,
    pub status: Availability,
    pub whois: WhoisReport,
    pub dns: DnsReport,
    pub tld: String,
    /// Wall time of the original check, e.g. `"0.45s"`.
    pub response_time: String,
    pub cached: bool,
}

impl From<&DomainCheckResult> for DomainCheckResponse {
    fn from(result: &DomainCheckResult) -> Self {
        Self {
            domain: result.query().full_name(),
            status: result.overall_status(),
            whois: result.whois().into(),
            dns: result.dns().into(),
            tld: result.query().tld().to_string(),
            response_time: format_response_time(result.elapsed()),
            cached: result.is_cached(),
        }
    }
}

/// Formats a duration as seconds with two decimals.
pub fn format_response_time(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DomainQuery;

    #[test]
    fn test_timeout_reported_as_error() {
        let result = DomainCheckResult::new(
            DomainQuery::parse("example", Some("org")).unwrap(),
            ProbeOutcome::timeout(ProbeDetail::empty_whois(), Duration::from_secs(5)),
            ProbeOutcome::taken(
                ProbeDetail::Dns {
                    records: vec!["10.0.0.1".to_string()],
                },
                Duration::from_millis(40),
            ),
            Duration::from_millis(5004),
        );

        let json = serde_json::to_value(DomainCheckResponse::from(&result)).unwrap();

        assert_eq!(json["domain"], "example.org");
        assert_eq!(json["tld"], "org");
        assert_eq!(json["status"], "taken");
        assert_eq!(json["whois"]["status"], "error");
        assert_eq!(json["whois"]["error"], "timeout");
        assert!(json["whois"]["details"]["registrar"].is_null());
        assert_eq!(json["dns"]["status"], "taken");
        assert_eq!(json["dns"]["records"][0], "10.0.0.1");
        assert!(json["dns"].get("error").is_none());
        assert_eq!(json["response_time"], "5.00s");
        assert_eq!(json["cached"], false);
    }

    #[test]
    fn test_format_response_time() {
        assert_eq!(format_response_time(Duration::from_millis(450)), "0.45s");
        assert_eq!(format_response_time(Duration::ZERO), "0.00s");
    }
}
