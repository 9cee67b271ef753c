//! # Domain Checker
//!
//! An HTTP service that answers "is this domain available?" by querying the
//! registry WHOIS server and DNS concurrently, built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Queries, probe outcomes, the tie-break policy and prober traits
//! - **Application Layer** ([`application`]) - Reconciliation, cached checks and bulk fan-out
//! - **Infrastructure Layer** ([`infrastructure`]) - WHOIS/DNS clients, caches and rate limiters
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//! - **Web Layer** ([`web`]) - HTML documentation and the OpenAPI document
//!
//! ## Features
//!
//! - WHOIS over TCP port 43 with per-registry response parsing
//! - A/AAAA lookups via hickory-resolver
//! - Deterministic verdict when the two sources disagree or fail
//! - In-memory or Redis result cache with TTL
//! - Per-client rate limits, in-memory or shared through Redis
//! - Bounded, order-preserving bulk checks
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: shared cache and rate limits
//! export CACHE_TYPE=redis
//! export REDIS_URL="redis://localhost:6379"
//!
//! # Start the service
//! cargo run
//!
//! curl 'http://localhost:3000/?domain=example&tld=com'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        BulkItem, BulkService, CheckService, ProbeTimeouts, ReconciliationEngine,
    };
    pub use crate::domain::entities::{
        Availability, DomainCheckResult, DomainQuery, ProbeDetail, ProbeOutcome, ProbeStatus,
    };
    pub use crate::domain::probers::Prober;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
