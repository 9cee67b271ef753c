//! WHOIS server directory trait.

use std::fmt;

/// Default WHOIS TCP port.
pub const WHOIS_PORT: u16 = 43;

/// Address of a WHOIS server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoisServer {
    pub host: String,
    pub port: u16,
}

impl WhoisServer {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: WHOIS_PORT,
        }
    }

    pub fn with_port(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parses `host` or `host:port`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        match value.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() => {
                port.parse().ok().map(|port| Self::with_port(host, port))
            }
            Some(_) => None,
            None => Some(Self::new(value)),
        }
    }
}

impl fmt::Display for WhoisServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Resolves which WHOIS server answers for a TLD.
///
/// Kept separate from the prober so the table can be swapped or extended
/// from configuration without touching lookup logic.
#[cfg_attr(test, mockall::automock)]
pub trait WhoisServerDirectory: Send + Sync {
    /// Returns the server for `tld` (lowercase, no leading dot), if known.
    fn server_for(&self, tld: &str) -> Option<WhoisServer>;
}
