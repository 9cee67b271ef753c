//! WHOIS prober speaking the plain-text protocol over TCP.

use crate::domain::entities::{DomainQuery, ProbeDetail, ProbeOutcome};
use crate::domain::probers::{Prober, WhoisServer, WhoisServerDirectory};
use crate::infrastructure::whois::parser::{WhoisVerdict, parse_response};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// Upper bound on bytes read from one WHOIS response.
const MAX_RESPONSE_BYTES: u64 = 64 * 1024;

/// Failures of a single WHOIS exchange.
#[derive(Debug, Error)]
pub enum WhoisError {
    #[error("no WHOIS server known for .{0}")]
    UnknownTld(String),

    #[error("WHOIS transport error with {server}: {source}")]
    Transport {
        server: String,
        #[source]
        source: std::io::Error,
    },
}

/// Queries the registry WHOIS server for a TLD and interprets the answer.
pub struct WhoisProber {
    directory: Arc<dyn WhoisServerDirectory>,
}

impl WhoisProber {
    pub fn new(directory: Arc<dyn WhoisServerDirectory>) -> Self {
        Self { directory }
    }

    /// Fetches the raw response text for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`WhoisError::UnknownTld`] without any I/O when the directory
    /// has no server, [`WhoisError::Transport`] on connect/write/read failure.
    pub async fn fetch(&self, query: &DomainQuery) -> Result<String, WhoisError> {
        let server = self
            .directory
            .server_for(query.tld())
            .ok_or_else(|| WhoisError::UnknownTld(query.tld().to_string()))?;

        exchange(&server, &query.full_name())
            .await
            .map_err(|source| WhoisError::Transport {
                server: server.to_string(),
                source,
            })
    }
}

async fn exchange(server: &WhoisServer, name: &str) -> std::io::Result<String> {
    let mut stream = TcpStream::connect((server.host.as_str(), server.port)).await?;
    stream.write_all(format!("{name}\r\n").as_bytes()).await?;

    let mut buffer = Vec::new();
    (&mut stream)
        .take(MAX_RESPONSE_BYTES)
        .read_to_end(&mut buffer)
        .await?;

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[async_trait]
impl Prober for WhoisProber {
    async fn probe(&self, query: &DomainQuery, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();

        let outcome = match tokio::time::timeout(timeout, self.fetch(query)).await {
            Ok(Ok(raw)) => match parse_response(&raw) {
                WhoisVerdict::Available => {
                    ProbeOutcome::available(ProbeDetail::empty_whois(), started.elapsed())
                }
                WhoisVerdict::Registered {
                    registrar,
                    expiration_date,
                } => ProbeOutcome::taken(
                    ProbeDetail::Whois {
                        registrar,
                        expiration_date,
                    },
                    started.elapsed(),
                ),
                WhoisVerdict::Unrecognized(reason) => {
                    ProbeOutcome::error(ProbeDetail::empty_whois(), reason, started.elapsed())
                }
            },
            Ok(Err(e)) => {
                ProbeOutcome::error(ProbeDetail::empty_whois(), e.to_string(), started.elapsed())
            }
            Err(_) => ProbeOutcome::timeout(ProbeDetail::empty_whois(), started.elapsed()),
        };

        debug!(
            domain = %query,
            status = ?outcome.status,
            latency_ms = outcome.latency.as_millis() as u64,
            "WHOIS probe finished"
        );

        outcome
    }
}
