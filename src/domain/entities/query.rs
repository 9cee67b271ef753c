//! Domain query entity: a validated `label.tld` pair.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// TLD used when the caller does not provide one.
pub const DEFAULT_TLD: &str = "com";

/// Maximum length of a single DNS label.
const MAX_LABEL_LENGTH: usize = 63;

static LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").unwrap());

static TLD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]{2,63}$").unwrap());

/// Reasons a raw `(domain, tld)` input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Missing domain parameter")]
    MissingDomain,

    #[error("Invalid domain name format")]
    InvalidDomain,

    #[error("Invalid TLD format")]
    InvalidTld,
}

/// A validated lookup target.
///
/// `domain` is a single label (no dots), `tld` is the suffix without the
/// leading dot. Both are stored lowercased, which also makes them usable as
/// a cache key as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainQuery {
    domain: String,
    tld: String,
}

impl DomainQuery {
    /// Cleans and validates raw user input.
    ///
    /// # Rules
    ///
    /// - Input is trimmed and lowercased
    /// - Label: 1-63 characters of `[a-z0-9-]`, no leading/trailing hyphen, no `--`
    /// - TLD: optional leading dot stripped, 2-63 ASCII letters; absent means `com`
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] describing the first rule that failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use domain_checker::domain::entities::DomainQuery;
    ///
    /// let query = DomainQuery::parse(" Example ", Some(".ORG")).unwrap();
    /// assert_eq!(query.full_name(), "example.org");
    /// ```
    pub fn parse(domain: &str, tld: Option<&str>) -> Result<Self, QueryError> {
        let domain = domain.trim().to_ascii_lowercase();
        if domain.is_empty() {
            return Err(QueryError::MissingDomain);
        }

        let tld = parse_tld(tld)?;

        if domain.len() > MAX_LABEL_LENGTH
            || domain.contains("--")
            || !LABEL_REGEX.is_match(&domain)
        {
            return Err(QueryError::InvalidDomain);
        }

        Ok(Self { domain, tld })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn tld(&self) -> &str {
        &self.tld
    }

    /// Returns `label.tld`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.domain, self.tld)
    }
}

impl fmt::Display for DomainQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain, self.tld)
    }
}

/// Normalizes and validates a TLD, defaulting to [`DEFAULT_TLD`] when absent.
///
/// # Errors
///
/// Returns [`QueryError::InvalidTld`] for a TLD that is present but empty
/// after cleanup, or that contains anything but 2-63 ASCII letters.
pub fn parse_tld(tld: Option<&str>) -> Result<String, QueryError> {
    let Some(raw) = tld else {
        return Ok(DEFAULT_TLD.to_string());
    };

    let tld = raw.trim().trim_start_matches('.').to_ascii_lowercase();
    if !TLD_REGEX.is_match(&tld) {
        return Err(QueryError::InvalidTld);
    }

    Ok(tld)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_input() {
        let query = DomainQuery::parse("  MyDomain ", Some(" .Net ")).unwrap();
        assert_eq!(query.domain(), "mydomain");
        assert_eq!(query.tld(), "net");
        assert_eq!(query.to_string(), "mydomain.net");
    }

    #[test]
    fn test_parse_defaults_tld() {
        let query = DomainQuery::parse("example", None).unwrap();
        assert_eq!(query.tld(), DEFAULT_TLD);
        assert_eq!(query.full_name(), "example.com");
    }

    #[test]
    fn test_parse_accepts_single_character_and_inner_hyphen() {
        assert!(DomainQuery::parse("x", None).is_ok());
        assert!(DomainQuery::parse("my-site2", None).is_ok());
    }

    #[test]
    fn test_parse_rejects_invalid_labels() {
        let long = "a".repeat(64);
        for bad in [
            "inv@lid",
            "-invalid",
            "invalid-",
            "inv--alid",
            long.as_str(),
            "domain.with.dots",
            "with space",
        ] {
            assert_eq!(
                DomainQuery::parse(bad, None),
                Err(QueryError::InvalidDomain),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_missing_domain() {
        assert_eq!(DomainQuery::parse("", None), Err(QueryError::MissingDomain));
        assert_eq!(DomainQuery::parse("   ", None), Err(QueryError::MissingDomain));
    }

    #[test]
    fn test_parse_rejects_invalid_tlds() {
        for bad in ["", ".", "c", "c0m", "co.uk", "x-y"] {
            assert_eq!(
                DomainQuery::parse("example", Some(bad)),
                Err(QueryError::InvalidTld),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_max_length_label_is_valid() {
        let label = "a".repeat(63);
        assert!(DomainQuery::parse(&label, None).is_ok());
    }
}
