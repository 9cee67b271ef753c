//! DTOs for the metrics endpoint.

use crate::infrastructure::rate_limit::RateRule;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    /// `"{d}d {h}h {m}m"`.
    pub uptime: String,
    pub cache_stats: CacheStatsReport,
    pub rate_limits: RateLimitsReport,
}

#[derive(Debug, Serialize)]
pub struct CacheStatsReport {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub backend: &'static str,
    pub ttl_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct RateLimitsReport {
    pub enabled: bool,
    pub backend: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single: Option<RateRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk: Option<RateRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<RateRule>,
}
