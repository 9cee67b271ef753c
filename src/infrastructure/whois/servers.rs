//! Built-in TLD to WHOIS server table.

use crate::domain::probers::{WhoisServer, WhoisServerDirectory};
use std::collections::HashMap;
use thiserror::Error;

/// Registry WHOIS servers for common TLDs.
const BUILTIN_SERVERS: &[(&str, &str)] = &[
    ("com", "whois.verisign-grs.com"),
    ("net", "whois.verisign-grs.com"),
    ("org", "whois.pir.org"),
    ("info", "whois.nic.info"),
    ("biz", "whois.nic.biz"),
    ("io", "whois.nic.io"),
    ("co", "whois.nic.co"),
    ("me", "whois.nic.me"),
    ("ai", "whois.nic.ai"),
    ("app", "whois.nic.google"),
    ("dev", "whois.nic.google"),
    ("page", "whois.nic.google"),
    ("xyz", "whois.nic.xyz"),
    ("online", "whois.nic.online"),
    ("site", "whois.nic.site"),
    ("tech", "whois.nic.tech"),
    ("store", "whois.nic.store"),
    ("shop", "whois.nic.shop"),
    ("club", "whois.nic.club"),
    ("tv", "whois.nic.tv"),
    ("cc", "ccwhois.verisign-grs.com"),
    ("us", "whois.nic.us"),
    ("uk", "whois.nic.uk"),
    ("de", "whois.denic.de"),
    ("fr", "whois.nic.fr"),
    ("nl", "whois.domain-registry.nl"),
    ("eu", "whois.eu"),
    ("ca", "whois.cira.ca"),
    ("au", "whois.auda.org.au"),
    ("ru", "whois.tcinet.ru"),
    ("ch", "whois.nic.ch"),
    ("se", "whois.iis.se"),
    ("jp", "whois.jprs.jp"),
    ("in", "whois.registry.in"),
];

/// Errors produced while parsing `WHOIS_SERVERS` overrides.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServerOverrideError {
    #[error("expected 'tld=host[:port]', got '{0}'")]
    Malformed(String),
}

/// In-memory [`WhoisServerDirectory`] seeded from the built-in table.
#[derive(Debug, Clone)]
pub struct StaticWhoisServers {
    servers: HashMap<String, WhoisServer>,
}

impl StaticWhoisServers {
    /// Directory with only the built-in entries.
    pub fn builtin() -> Self {
        let servers = BUILTIN_SERVERS
            .iter()
            .map(|(tld, host)| (tld.to_string(), WhoisServer::new(*host)))
            .collect();

        Self { servers }
    }

    /// Directory with no entries, for callers that supply the whole table.
    pub fn empty() -> Self {
        Self {
            servers: HashMap::new(),
        }
    }

    /// Adds or replaces the server for `tld`.
    pub fn insert(&mut self, tld: &str, server: WhoisServer) {
        self.servers
            .insert(tld.trim_start_matches('.').to_ascii_lowercase(), server);
    }

    /// Applies overrides on top of the current table.
    pub fn with_overrides(mut self, overrides: &[(String, WhoisServer)]) -> Self {
        for (tld, server) in overrides {
            self.insert(tld, server.clone());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

impl Default for StaticWhoisServers {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WhoisServerDirectory for StaticWhoisServers {
    fn server_for(&self, tld: &str) -> Option<WhoisServer> {
        self.servers.get(tld).cloned()
    }
}

/// Parses a comma-separated `tld=host[:port]` list.
///
/// # Errors
///
/// Returns [`ServerOverrideError::Malformed`] for the first entry without
/// `=`, with an empty TLD, or with an unparsable server.
pub fn parse_server_overrides(
    value: &str,
) -> Result<Vec<(String, WhoisServer)>, ServerOverrideError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (tld, server) = entry
                .split_once('=')
                .ok_or_else(|| ServerOverrideError::Malformed(entry.to_string()))?;

            let tld = tld.trim().trim_start_matches('.').to_ascii_lowercase();
            let server = WhoisServer::parse(server)
                .filter(|_| !tld.is_empty())
                .ok_or_else(|| ServerOverrideError::Malformed(entry.to_string()))?;

            Ok((tld, server))
        })
        .collect()
}
