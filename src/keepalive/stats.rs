//! Cache Statistics Module
//!
//! Counters for hits, misses, evictions and the internally handled
//! conditions (policy bypasses, dropped scroll restores).

use serde::Serialize;

// == Cache Counters ==
/// Running totals since the cache was created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheCounters {
    /// Navigations that reused a cached view
    pub hits: u64,
    /// Navigations that mounted and cached a new view
    pub misses: u64,
    /// Entries dropped by the LRU policy
    pub evictions: u64,
    /// Navigations to non-cacheable paths that rendered fresh
    pub bypasses: u64,
    /// Deferred scroll restores dropped because their view was no longer active
    pub dropped_restores: u64,
}

impl CacheCounters {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// hits / (hits + misses), or 0.0 before the first cacheable navigation.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_bypass(&mut self) {
        self.bypasses += 1;
    }

    pub fn record_dropped_restore(&mut self) {
        self.dropped_restores += 1;
    }
}

// == Cache Stats ==
/// Point-in-time view of the cache for introspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of cached entries
    pub count: usize,
    /// Key of the visible cached view, if any
    pub active_key: Option<String>,
    /// Current capacity
    pub max_cache: usize,
    /// Cached keys, most recently visited first
    pub keys: Vec<String>,
    #[serde(flatten)]
    pub counters: CacheCounters,
}
