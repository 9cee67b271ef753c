//! Free-text WHOIS response interpretation.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Phrases registries use when a name is not registered.
const ABSENCE_MARKERS: &[&str] = &[
    "no match",
    "not found",
    "no data found",
    "no entries found",
    "no object found",
    "nothing found",
    "domain not found",
    "status: free",
    "status: available",
    "is available for registration",
    "no such domain",
    "does not exist",
    "we do not have an entry in our database",
];

/// Line endings of registries that answer `<name> is free` (SIDN, .nl).
///
/// Matched per line so disclaimers like "this service is free of charge"
/// never count.
const FREE_LINE_SUFFIXES: &[&str] = &[" is free", " is free."];

/// Phrases registries use when refusing to answer.
const REFUSAL_MARKERS: &[&str] = &[
    "limit exceeded",
    "quota exceeded",
    "too many requests",
    "exceeded the maximum allowable",
    "try again later",
];

/// Phrases that only appear in a record for a registered name.
const REGISTRATION_MARKERS: &[&str] = &[
    "domain name:",
    "domain:",
    "registrar",
    "creation date:",
    "created:",
    "registered on:",
    "registry domain id:",
    "name server:",
    "nserver:",
];

const REGISTRAR_LABELS: &[&str] = &["registrar:", "registrar name:", "sponsoring registrar:"];

const EXPIRATION_LABELS: &[&str] = &[
    "registry expiry date:",
    "registrar registration expiration date:",
    "expiration date:",
    "expiry date:",
    "expires on:",
    "expires:",
    "expire:",
    "paid-till:",
    "renewal date:",
];

/// Interpretation of a raw WHOIS response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhoisVerdict {
    Available,
    Registered {
        registrar: Option<String>,
        expiration_date: Option<String>,
    },
    /// The text could not be interpreted either way.
    Unrecognized(String),
}

/// Classifies a WHOIS response and extracts registration fields.
///
/// Refusals (rate limiting by the registry) and texts with neither absence
/// nor registration markers are [`WhoisVerdict::Unrecognized`], which the
/// prober reports as an inconclusive error.
pub fn parse_response(raw: &str) -> WhoisVerdict {
    let lower = raw.to_lowercase();

    if lower.trim().is_empty() {
        return WhoisVerdict::Unrecognized("empty WHOIS response".to_string());
    }

    if REFUSAL_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return WhoisVerdict::Unrecognized("WHOIS server refused the query".to_string());
    }

    if is_absence(&lower) {
        return WhoisVerdict::Available;
    }

    if !REGISTRATION_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
    {
        return WhoisVerdict::Unrecognized("unrecognized WHOIS response".to_string());
    }

    WhoisVerdict::Registered {
        registrar: extract_registrar(raw),
        expiration_date: extract_field(raw, EXPIRATION_LABELS).map(|date| normalize_date(&date)),
    }
}

fn is_absence(lower: &str) -> bool {
    ABSENCE_MARKERS.iter().any(|marker| lower.contains(marker))
        || lower.lines().any(|line| {
            let line = line.trim_end();
            FREE_LINE_SUFFIXES.iter().any(|suffix| line.ends_with(suffix))
        })
}

/// Finds the registrar, including the Nominet-style indented block:
///
/// ```text
/// Registrar:
///     Example Registrar Ltd [Tag = EXAMPLE]
/// ```
fn extract_registrar(raw: &str) -> Option<String> {
    if let Some(registrar) = extract_field(raw, REGISTRAR_LABELS) {
        return Some(registrar);
    }

    let mut in_block = false;
    for line in raw.lines() {
        let trimmed = line.trim();
        if in_block {
            if trimmed.is_empty() {
                continue;
            }
            if !(line.starts_with(' ') || line.starts_with('\t')) {
                return None;
            }
            let value = trimmed
                .strip_prefix("Name:")
                .map(str::trim)
                .unwrap_or(trimmed);
            return Some(strip_tag(value));
        }
        if trimmed.eq_ignore_ascii_case("registrar:") {
            in_block = true;
        }
    }

    None
}

/// Returns the value of the first line whose label matches one of `labels`.
fn extract_field(raw: &str, labels: &[&str]) -> Option<String> {
    for label in labels {
        for line in raw.lines() {
            let trimmed = line.trim();
            let Some(head) = trimmed.get(..label.len()) else {
                continue;
            };
            if head.eq_ignore_ascii_case(label) {
                let value = trimmed[label.len()..].trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }

    None
}

/// Drops Nominet's trailing `[Tag = ...]` annotation.
fn strip_tag(value: &str) -> String {
    match value.find(" [Tag") {
        Some(index) => value[..index].trim().to_string(),
        None => value.to_string(),
    }
}

/// Normalizes known date formats to `YYYY-MM-DD`, keeping the raw value otherwise.
fn normalize_date(value: &str) -> String {
    let candidate = value.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(candidate) {
        return date.date_naive().format("%Y-%m-%d").to_string();
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(candidate, format) {
            return date.date().format("%Y-%m-%d").to_string();
        }
    }

    let first_token = candidate.split_whitespace().next().unwrap_or(candidate);
    for format in ["%Y-%m-%d", "%d-%b-%Y", "%Y.%m.%d", "%d.%m.%Y", "%Y/%m/%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(first_token, format) {
            return date.format("%Y-%m-%d").to_string();
        }
    }

    candidate.to_string()
}
