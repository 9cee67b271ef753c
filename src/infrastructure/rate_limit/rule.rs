//! Rate rules of the form `N per window`.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

static RULE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s*(?:per|/)\s*(second|minute|hour|day)s?\s*$").unwrap()
});

/// Length of a counting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateWindow {
    Second,
    Minute,
    Hour,
    Day,
}

impl RateWindow {
    pub fn duration(self) -> Duration {
        Duration::from_secs(match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 3_600,
            Self::Day => 86_400,
        })
    }

    fn name(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }
}

/// `requests` allowed per `window` for one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateRule {
    pub requests: NonZeroU32,
    pub window: RateWindow,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid rate rule '{0}', expected e.g. '10 per minute' or '10/minute'")]
pub struct RateRuleParseError(String);

impl RateRule {
    pub fn new(requests: NonZeroU32, window: RateWindow) -> Self {
        Self { requests, window }
    }
}

impl FromStr for RateRule {
    type Err = RateRuleParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.to_ascii_lowercase();
        let captures = RULE_REGEX
            .captures(&lower)
            .ok_or_else(|| RateRuleParseError(value.to_string()))?;

        let requests = captures[1]
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| RateRuleParseError(value.to_string()))?;

        let window = match &captures[2] {
            "second" => RateWindow::Second,
            "minute" => RateWindow::Minute,
            "hour" => RateWindow::Hour,
            _ => RateWindow::Day,
        };

        Ok(Self { requests, window })
    }
}

impl fmt::Display for RateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} per {}", self.requests, self.window.name())
    }
}

impl Serialize for RateRule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_spellings() {
        let rule: RateRule = "10 per minute".parse().unwrap();
        assert_eq!(rule.requests.get(), 10);
        assert_eq!(rule.window, RateWindow::Minute);

        let rule: RateRule = "100/day".parse().unwrap();
        assert_eq!(rule.requests.get(), 100);
        assert_eq!(rule.window, RateWindow::Day);

        let rule: RateRule = " 5 Per Hours ".parse().unwrap();
        assert_eq!(rule.window, RateWindow::Hour);
    }

    #[test]
    fn test_parse_rejects_invalid_rules() {
        for bad in ["", "ten per minute", "0 per minute", "10 per fortnight", "10"] {
            assert!(bad.parse::<RateRule>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_display_round_trips() {
        let rule: RateRule = "5/minute".parse().unwrap();
        assert_eq!(rule.to_string(), "5 per minute");
        assert_eq!(rule.to_string().parse::<RateRule>().unwrap(), rule);
    }
}
