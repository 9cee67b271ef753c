//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer and the
//! collaborator traits used by the application layer.
//!
//! # Modules
//!
//! - [`whois`] - WHOIS prober over TCP and response parsing
//! - [`dns`] - DNS prober via hickory-resolver
//! - [`cache`] - Result caching (memory, Redis, no-op)
//! - [`rate_limit`] - Per-client admission control (memory, Redis, no-op)

pub mod cache;
pub mod dns;
pub mod rate_limit;
pub mod whois;
