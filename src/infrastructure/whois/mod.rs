//! WHOIS prober and its supporting pieces.
//!
//! - [`WhoisProber`] - TCP port 43 client implementing [`crate::domain::probers::Prober`]
//! - [`parser`] - Free-text response classification and field extraction
//! - [`StaticWhoisServers`] - Built-in TLD table, extensible from configuration

mod client;
pub mod parser;
mod servers;

pub use client::{WhoisError, WhoisProber};
pub use servers::{ServerOverrideError, StaticWhoisServers, parse_server_overrides};
