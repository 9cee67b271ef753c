//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one endpoint.

pub mod bulk;
pub mod check;
pub mod health;
pub mod metrics;

pub use bulk::bulk_handler;
pub use check::check_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
