//! Prober interfaces for the domain layer.
//!
//! The reconciliation engine only sees these traits; the concrete network
//! implementations live in `crate::infrastructure`.
//!
//! - [`Prober`] - One availability signal (WHOIS or DNS)
//! - [`WhoisServerDirectory`] - TLD to WHOIS server lookup

pub mod prober;
pub mod whois_servers;

pub use prober::Prober;
pub use whois_servers::{WHOIS_PORT, WhoisServer, WhoisServerDirectory};

#[cfg(test)]
pub use prober::MockProber;
#[cfg(test)]
pub use whois_servers::MockWhoisServerDirectory;
