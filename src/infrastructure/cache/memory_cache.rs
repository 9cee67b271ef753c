//! In-process cache with per-entry TTL.

use super::service::{CacheResult, CacheService, cache_key};
use crate::domain::entities::{DomainCheckResult, DomainQuery};
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

struct CacheEntry {
    result: DomainCheckResult,
    inserted_at: Instant,
}

/// Sharded in-memory cache (`CACHE_TYPE=simple`).
///
/// Expired entries are dropped on read and by [`MemoryCache::purge_expired`],
/// which the server calls on a fixed interval.
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Removes every expired entry, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| entry.inserted_at.elapsed() <= ttl);
        let purged = before.saturating_sub(self.entries.len());

        if purged > 0 {
            debug!("Cache PURGE: {} expired entries", purged);
        }
        purged
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, query: &DomainQuery) -> CacheResult<Option<DomainCheckResult>> {
        let key = cache_key(query);

        let expired = match self.entries.get(&key) {
            Some(entry) if entry.inserted_at.elapsed() <= self.ttl => {
                debug!("Cache HIT: {}", key);
                return Ok(Some(entry.result.clone()));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries
                .remove_if(&key, |_, entry| entry.inserted_at.elapsed() > self.ttl);
        }

        debug!("Cache MISS: {}", key);
        Ok(None)
    }

    async fn set(&self, result: &DomainCheckResult) -> CacheResult<()> {
        let key = cache_key(result.query());
        self.entries.insert(
            key.clone(),
            CacheEntry {
                result: result.clone(),
                inserted_at: Instant::now(),
            },
        );

        debug!("Cache SET: {} (TTL: {}s)", key, self.ttl.as_secs());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "simple"
    }
}
