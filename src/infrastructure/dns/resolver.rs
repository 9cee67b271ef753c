//! DNS prober backed by hickory-resolver.

use crate::domain::entities::{DomainQuery, ProbeDetail, ProbeOutcome};
use crate::domain::probers::Prober;
use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use hickory_resolver::config::{NameServerConfig, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::xfer::Protocol;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Why a lookup produced no addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// NXDOMAIN or an empty answer.
    NoRecords,
    /// SERVFAIL, refused, network errors.
    Resolver(String),
}

/// Resolves `label.tld` to A/AAAA records.
pub struct DnsProber {
    resolver: TokioResolver,
}

impl DnsProber {
    /// Builds a prober using the system resolver configuration, or
    /// `nameservers` when non-empty.
    ///
    /// Falls back to Cloudflare's public resolvers if the system
    /// configuration cannot be read.
    pub fn new(nameservers: &[IpAddr], timeout: Duration) -> Self {
        let mut builder = if nameservers.is_empty() {
            match TokioResolver::builder_tokio() {
                Ok(builder) => builder,
                Err(e) => {
                    warn!("Failed to read system resolver config: {}. Using Cloudflare.", e);
                    TokioResolver::builder_with_config(
                        ResolverConfig::cloudflare(),
                        TokioConnectionProvider::default(),
                    )
                }
            }
        } else {
            let mut config = ResolverConfig::new();
            for server in nameservers {
                config.add_name_server(NameServerConfig::new(
                    SocketAddr::new(*server, 53),
                    Protocol::Udp,
                ));
            }
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
        };

        let options = builder.options_mut();
        options.timeout = timeout;
        options.attempts = 1;
        options.cache_size = 0;

        Self {
            resolver: builder.build(),
        }
    }

    async fn lookup(&self, query: &DomainQuery) -> Result<Vec<String>, LookupFailure> {
        let name = format!("{}.", query.full_name());

        match self.resolver.lookup_ip(name).await {
            Ok(lookup) => Ok(lookup.iter().map(|ip| ip.to_string()).collect()),
            Err(e) if e.is_nx_domain() || e.is_no_records_found() => Err(LookupFailure::NoRecords),
            Err(e) => Err(LookupFailure::Resolver(e.to_string())),
        }
    }
}

/// Maps a lookup result to a probe outcome.
///
/// Addresses are deduplicated, keeping resolver order.
pub fn classify(result: Result<Vec<String>, LookupFailure>, latency: Duration) -> ProbeOutcome {
    match result {
        Ok(addresses) if !addresses.is_empty() => {
            let mut records: Vec<String> = Vec::with_capacity(addresses.len());
            for address in addresses {
                if !records.contains(&address) {
                    records.push(address);
                }
            }
            ProbeOutcome::taken(ProbeDetail::Dns { records }, latency)
        }
        Ok(_) | Err(LookupFailure::NoRecords) => {
            ProbeOutcome::available(ProbeDetail::empty_dns(), latency)
        }
        Err(LookupFailure::Resolver(message)) => {
            ProbeOutcome::error(ProbeDetail::empty_dns(), message, latency)
        }
    }
}

#[async_trait]
impl Prober for DnsProber {
    async fn probe(&self, query: &DomainQuery, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();

        let outcome = match tokio::time::timeout(timeout, self.lookup(query)).await {
            Ok(result) => classify(result, started.elapsed()),
            Err(_) => ProbeOutcome::timeout(ProbeDetail::empty_dns(), started.elapsed()),
        };

        debug!(
            domain = %query,
            status = ?outcome.status,
            latency_ms = outcome.latency.as_millis() as u64,
            "DNS probe finished"
        );

        outcome
    }
}
