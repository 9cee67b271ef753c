//! Domain layer containing entities, prober interfaces and the tie-break policy.
//!
//! # Architecture
//!
//! - [`entities`] - Queries, probe outcomes and reconciled results
//! - [`probers`] - Trait definitions implemented by the infrastructure layer
//! - [`policy`] - Pure function mapping two probe verdicts to one
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Prober traits define contracts implemented in `crate::infrastructure`
//! - Orchestration lives in services (see [`crate::application::services`])

pub mod entities;
pub mod policy;
pub mod probers;
