//! Core domain entities for availability checks.
//!
//! # Entity Types
//!
//! - [`DomainQuery`] - A validated `label.tld` lookup target
//! - [`ProbeOutcome`] - The verdict of one prober, with its payload
//! - [`DomainCheckResult`] - The reconciled verdict for one query
//!
//! Entities are immutable once built; the only derived field
//! (`DomainCheckResult::overall_status`) is computed by the constructor.

pub mod check_result;
pub mod probe_outcome;
pub mod query;

pub use check_result::{Availability, DomainCheckResult};
pub use probe_outcome::{ProbeDetail, ProbeOutcome, ProbeStatus};
pub use query::{DEFAULT_TLD, DomainQuery, QueryError, parse_tld};
