//! HTTP server initialization and runtime setup.
//!
//! Handles cache and rate limiter backend selection, prober construction,
//! background maintenance tasks, and Axum server lifecycle.

use crate::application::services::{BulkService, CheckService, ProbeTimeouts, ReconciliationEngine};
use crate::config::{CacheType, Config};
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache, connect_manager};
use crate::infrastructure::dns::DnsProber;
use crate::infrastructure::rate_limit::{
    MemoryRateLimiter, NoopRateLimiter, RateLimiter, RedisRateLimiter,
};
use crate::infrastructure::whois::{StaticWhoisServers, WhoisProber};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// How often expired in-memory cache entries and idle limiter keys are dropped.
const MAINTENANCE_INTERVAL: Duration = Duration::from_secs(60);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Result cache (`CACHE_TYPE`, in-memory fallback when Redis is unreachable)
/// - Rate limiter (Redis when `REDIS_URL` is set, in-memory otherwise)
/// - WHOIS and DNS probers
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let cache = build_cache(&config).await;
    let limiter = build_limiter(&config).await;
    let checker = Arc::new(build_checker(&config, cache));
    let bulk = Arc::new(BulkService::new(
        checker.clone(),
        config.max_bulk_domains,
        config.bulk_concurrency,
    ));

    let state = AppState::new(checker, bulk, limiter, config.cache_ttl());

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Builds the cached checker over real WHOIS and DNS probers.
pub fn build_checker(config: &Config, cache: Arc<dyn CacheService>) -> CheckService {
    let directory = StaticWhoisServers::builtin().with_overrides(&config.whois_servers);
    let whois = Arc::new(WhoisProber::new(Arc::new(directory)));
    let dns = Arc::new(DnsProber::new(&config.dns_nameservers, config.dns_timeout));

    let timeouts = ProbeTimeouts {
        whois: config.whois_timeout,
        dns: config.dns_timeout,
    };

    CheckService::new(ReconciliationEngine::new(whois, dns), cache, timeouts)
}

/// Selects the cache backend from `CACHE_TYPE`.
///
/// An unreachable Redis falls back to the in-memory cache with a warning.
pub async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    let ttl = config.cache_ttl();

    match (config.cache_type, &config.cache_redis_url) {
        (CacheType::Null, _) => {
            tracing::info!("Cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
        (CacheType::Redis, Some(url)) => match RedisCache::connect(url, ttl).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-memory cache.", e);
                memory_cache(ttl)
            }
        },
        _ => {
            tracing::info!("Cache enabled (in-memory)");
            memory_cache(ttl)
        }
    }
}

fn memory_cache(ttl: Duration) -> Arc<dyn CacheService> {
    let cache = Arc::new(MemoryCache::new(ttl));

    let purger = cache.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(MAINTENANCE_INTERVAL);
        loop {
            interval.tick().await;
            purger.purge_expired();
        }
    });

    cache
}

/// Selects the rate limiter from `ENABLE_RATE_LIMITS` and `REDIS_URL`.
///
/// An unreachable Redis falls back to the in-memory limiter with a warning.
pub async fn build_limiter(config: &Config) -> Arc<dyn RateLimiter> {
    if !config.enable_rate_limits {
        tracing::info!("Rate limits disabled");
        return Arc::new(NoopRateLimiter);
    }

    if let Some(url) = &config.redis_url {
        match connect_manager(url).await {
            Ok(manager) => {
                tracing::info!("Rate limits enabled (Redis)");
                return Arc::new(RedisRateLimiter::new(manager, config.rate_limits));
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to Redis for rate limits: {}. Using in-memory limiter.",
                    e
                );
            }
        }
    } else {
        tracing::info!("Rate limits enabled (in-memory)");
    }

    let limiter = Arc::new(MemoryRateLimiter::new(config.rate_limits));

    let sweeper = limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(MAINTENANCE_INTERVAL);
        loop {
            interval.tick().await;
            sweeper.retain_recent();
        }
    });

    limiter
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
