//! Utility functions shared by handlers and the admin CLI.
//!
//! - [`uptime`] - Uptime formatting for `/metrics`

pub mod uptime;
