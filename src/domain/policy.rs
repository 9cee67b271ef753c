//! Tie-break policy reconciling WHOIS and DNS verdicts.
//!
//! WHOIS is authoritative when it answers confidently. DNS corroborates: a
//! resolving name is registered even if WHOIS claims otherwise, while DNS
//! absence only counts when WHOIS could not answer. Two inconclusive probes
//! resolve to [`Availability::Taken`].

use crate::domain::entities::{Availability, ProbeStatus};

/// Computes the overall verdict from the two probe statuses.
///
/// | whois     | dns       | overall   |
/// |-----------|-----------|-----------|
/// | Taken     | any       | Taken     |
/// | Available | Taken     | Taken     |
/// | Available | Available | Available |
/// | Available | Error     | Available |
/// | Error     | Taken     | Taken     |
/// | Error     | Available | Available |
/// | Error     | Error     | Taken     |
///
/// `Timeout` behaves exactly like `Error`.
pub fn reconcile(whois: ProbeStatus, dns: ProbeStatus) -> Availability {
    use ProbeStatus::*;

    match (whois, dns) {
        (Taken, _) => Availability::Taken,
        (Available, Taken) => Availability::Taken,
        (Available, _) => Availability::Available,
        (Error | Timeout, Taken) => Availability::Taken,
        (Error | Timeout, Available) => Availability::Available,
        (Error | Timeout, Error | Timeout) => Availability::Taken,
    }
}
