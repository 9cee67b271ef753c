//! Caching layer for domain check results.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`MemoryCache`] - In-process map with TTL (default)
//! - [`RedisCache`] - Shared Redis-backed cache
//! - [`NullCache`] - No-op implementation for disabled caching

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::{KEY_PREFIX, RedisCache, connect_manager};
pub use service::{CacheError, CacheResult, CacheService, cache_key};

#[cfg(test)]
pub use service::MockCacheService;
