//! Human-facing API documentation.
//!
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Template and OpenAPI handlers
//! - [`routes`] - Documentation route configuration

pub mod handlers;
pub mod routes;
