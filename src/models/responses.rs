//! Response DTOs for the inspection API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::keepalive::{CacheEntry, CachePolicy, CacheStats, NavigationKind, ViewState};
use crate::simulator::SessionNavigation;

/// Response body for POST /navigate
#[derive(Debug, Clone, Serialize)]
pub struct NavigateResponse {
    /// Cache key of the shown view, null for a fresh render
    pub key: Option<String>,
    pub kind: NavigationKind,
    /// Keys evicted to make room
    pub evicted: Vec<String>,
    /// Whether a scroll restore runs on the next paint
    pub restore_scheduled: bool,
}

impl From<&SessionNavigation> for NavigateResponse {
    fn from(nav: &SessionNavigation) -> Self {
        Self {
            key: nav.key.clone(),
            kind: nav.kind,
            evicted: nav.evicted.clone(),
            restore_scheduled: nav.restore.is_some(),
        }
    }
}

/// Response body for GET /entries/:key
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub key: String,
    pub path: String,
    pub state: ViewState,
    pub created_at: DateTime<Utc>,
    pub last_access_at: DateTime<Utc>,
    pub access_count: u64,
    pub scroll_offset: Option<f64>,
    pub metadata: Map<String, Value>,
}

impl EntryResponse {
    pub fn new<H>(entry: &CacheEntry<H>, state: ViewState) -> Self {
        Self {
            key: entry.key.clone(),
            path: entry.path.clone(),
            state,
            created_at: entry.created_at,
            last_access_at: entry.last_access_at,
            access_count: entry.access_count,
            scroll_offset: entry.scroll_offset,
            metadata: entry.metadata.clone(),
        }
    }
}

/// Response body for DELETE /entries/:key
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    pub message: String,
    pub key: String,
}

impl RemoveResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Entry '{}' removed", key),
            key,
        }
    }
}

/// Response body for DELETE /entries
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub removed: usize,
}

/// Response body for PUT /max-cache
#[derive(Debug, Clone, Serialize)]
pub struct MaxCacheResponse {
    pub max_cache: usize,
    pub evicted: Vec<String>,
}

/// Response body for PUT /policy
#[derive(Debug, Clone, Serialize)]
pub struct PolicyResponse {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Hidden entries dropped because the new policy rejects them
    pub pruned: Vec<String>,
}

impl PolicyResponse {
    pub fn new(policy: &CachePolicy, pruned: Vec<String>) -> Self {
        Self {
            include: policy.include.clone(),
            exclude: policy.exclude.clone(),
            pruned,
        }
    }
}

/// Response body for GET/PUT /viewport
#[derive(Debug, Clone, Serialize)]
pub struct ViewportResponse {
    pub offset: f64,
    pub laid_out: bool,
    /// Path of the page on screen
    pub current_path: Option<String>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    pub scroll_restoration: bool,
}

impl StatsResponse {
    pub fn new(stats: CacheStats, scroll_restoration: bool) -> Self {
        let hit_rate = stats.counters.hit_rate();
        Self {
            stats,
            hit_rate,
            scroll_restoration,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
