//! Cache service trait and error types.

use crate::domain::entities::{DomainCheckResult, DomainQuery};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Builds the cache key for a query: `domain:tld`, lowercased.
pub fn cache_key(query: &DomainQuery) -> String {
    format!("{}:{}", query.domain(), query.tld())
}

/// Trait for memoizing domain check results.
///
/// Implementations must be thread-safe and fail open: a backend failure is
/// logged and reported as a miss, never as a request failure. Concurrent
/// writes for the same key are allowed to race; the last write wins.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process map with TTL
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with key expiry
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a stored result for `query`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(result))` on a live entry, exactly as it was stored
    /// - `Ok(None)` on a miss, an expired entry, or a backend error
    async fn get(&self, query: &DomainQuery) -> CacheResult<Option<DomainCheckResult>>;

    /// Stores `result` under its query for the configured TTL.
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers.
    async fn set(&self, result: &DomainCheckResult) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name reported on `/metrics`.
    fn backend(&self) -> &'static str;
}
