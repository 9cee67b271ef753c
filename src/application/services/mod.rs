//! Business logic services for the application layer.

pub mod bulk_service;
pub mod check_service;
pub mod reconciliation;

pub use bulk_service::{BulkError, BulkItem, BulkService};
pub use check_service::{CacheStats, CacheStatsSnapshot, CheckService};
pub use reconciliation::{ProbeTimeouts, ReconciliationEngine};
