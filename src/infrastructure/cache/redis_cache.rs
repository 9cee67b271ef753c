//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService, cache_key};
use crate::domain::entities::{DomainCheckResult, DomainQuery};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

/// Namespace for all keys written by this service.
pub const KEY_PREFIX: &str = "domaincheck:";

/// Redis cache for check results (`CACHE_TYPE=redis`).
///
/// Results are stored as JSON with `SET EX`, so expiry is handled by Redis.
/// All operations are fail-open: errors are logged but don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the TTL.
    ///
    /// The initial connection is retried three times with jittered exponential
    /// backoff before giving up.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, ttl: Duration) -> CacheResult<Self> {
        info!("Connecting to Redis cache");

        let manager = connect_manager(redis_url).await?;

        info!("✓ Connected to Redis cache");

        Ok(Self {
            client: manager,
            ttl_seconds: ttl.as_secs().max(1),
        })
    }

    fn build_key(&self, query: &DomainQuery) -> String {
        format!("{}{}", KEY_PREFIX, cache_key(query))
    }
}

/// Opens a managed connection and verifies it with PING, retrying on failure.
///
/// # Errors
///
/// Returns [`CacheError::ConnectionError`] once all attempts are exhausted.
pub async fn connect_manager(redis_url: &str) -> CacheResult<ConnectionManager> {
    let client = Client::open(redis_url).map_err(|e| {
        CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
    })?;

    let strategy = ExponentialBackoff::from_millis(100).map(jitter).take(3);

    Retry::spawn(strategy, || {
        let client = client.clone();
        async move {
            let manager = ConnectionManager::new(client).await.map_err(|e| {
                warn!("Redis connection attempt failed: {}", e);
                CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
            })?;

            let mut test_conn = manager.clone();
            test_conn
                .ping::<()>()
                .await
                .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

            Ok(manager)
        }
    })
    .await
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, query: &DomainQuery) -> CacheResult<Option<DomainCheckResult>> {
        let key = self.build_key(query);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(result) => {
                    debug!("Cache HIT: {}", key);
                    Ok(Some(result))
                }
                Err(e) => {
                    warn!("Discarding undecodable cache entry {}: {}", key, e);
                    Ok(None)
                }
            },
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set(&self, result: &DomainCheckResult) -> CacheResult<()> {
        let key = self.build_key(result.query());
        let payload = serde_json::to_string(result)
            .map_err(|e| CacheError::OperationError(e.to_string()))?;
        let mut conn = self.client.clone();

        match conn
            .set_ex::<_, _, ()>(&key, payload, self.ttl_seconds)
            .await
        {
            Ok(_) => {
                debug!("Cache SET: {} (TTL: {}s)", key, self.ttl_seconds);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", key, e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
