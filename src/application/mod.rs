//! Application layer services implementing the check workflow.
//!
//! Services consume the domain's prober traits and the infrastructure's
//! collaborator traits, and provide a clean API for HTTP handlers and the
//! admin CLI.
//!
//! # Available Services
//!
//! - [`services::reconciliation::ReconciliationEngine`] - Concurrent WHOIS + DNS probing and tie-break
//! - [`services::check_service::CheckService`] - Cache-aware single checks and hit/miss counters
//! - [`services::bulk_service::BulkService`] - Bounded, order-preserving fan-out

pub mod services;
