//! Eviction Policy Module
//!
//! Least-recently-used capacity enforcement with a pinned active entry.

use crate::error::{KeepAliveError, Result};
use crate::keepalive::CacheStore;

// == Eviction Policy ==
/// Decides which keys must leave the store to honor `max_cache`.
///
/// Victims are picked oldest visit first. The pinned key (the visible view)
/// is never picked.
#[derive(Debug, Clone)]
pub struct EvictionPolicy {
    max_cache: usize,
}

impl EvictionPolicy {
    /// Fails with `InvalidCapacity` when `max_cache` is zero.
    pub fn new(max_cache: usize) -> Result<Self> {
        validate_capacity(max_cache)?;
        Ok(Self { max_cache })
    }

    pub fn max_cache(&self) -> usize {
        self.max_cache
    }

    /// Changes the capacity. The caller runs [`overflow`](Self::overflow)
    /// right after so a lowered limit takes effect immediately.
    pub fn set_max_cache(&mut self, max_cache: usize) -> Result<()> {
        validate_capacity(max_cache)?;
        self.max_cache = max_cache;
        Ok(())
    }

    // == Admit ==
    /// Keys to evict so that inserting `new_key` keeps the store within
    /// capacity. Re-inserting an existing key needs no room.
    pub fn admit<H>(&self, store: &CacheStore<H>, new_key: &str, pinned: Option<&str>) -> Vec<String> {
        let projected = if store.contains(new_key) {
            store.size()
        } else {
            store.size() + 1
        };
        self.victims(store, projected, Some(new_key), pinned)
    }

    // == Overflow ==
    /// Keys to evict so the current store fits the current capacity.
    pub fn overflow<H>(&self, store: &CacheStore<H>, pinned: Option<&str>) -> Vec<String> {
        self.victims(store, store.size(), None, pinned)
    }

    fn victims<H>(
        &self,
        store: &CacheStore<H>,
        projected: usize,
        incoming: Option<&str>,
        pinned: Option<&str>,
    ) -> Vec<String> {
        let excess = projected.saturating_sub(self.max_cache);
        if excess == 0 {
            return Vec::new();
        }

        store
            .recency()
            .oldest_first()
            .filter(|key| Some(*key) != pinned && Some(*key) != incoming)
            .take(excess)
            .map(str::to_string)
            .collect()
    }
}

fn validate_capacity(max_cache: usize) -> Result<()> {
    if max_cache < 1 {
        return Err(KeepAliveError::InvalidCapacity(max_cache));
    }
    Ok(())
}
