//! Documentation handlers.

pub mod docs;

pub use docs::{docs_handler, openapi_handler};
