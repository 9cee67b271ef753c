//! DNS prober.
//!
//! [`DnsProber`] resolves A/AAAA records through hickory-resolver; the
//! mapping from lookup result to verdict lives in [`classify`] so it can be
//! exercised without a network.

mod resolver;

pub use resolver::{DnsProber, LookupFailure, classify};
