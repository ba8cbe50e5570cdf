//! Cache Store Module
//!
//! Owns the key → entry mapping and the visit order. The store never evicts
//! on its own; capacity decisions come from the eviction policy.

use std::collections::HashMap;

use crate::keepalive::{CacheEntry, RecencyList};

// == Cache Store ==
/// Single source of truth for what is cached right now.
#[derive(Debug)]
pub struct CacheStore<H> {
    entries: HashMap<String, CacheEntry<H>>,
    recency: RecencyList,
}

impl<H> CacheStore<H> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyList::new(),
        }
    }

    // == Get ==
    pub fn get(&self, key: &str) -> Option<&CacheEntry<H>> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut CacheEntry<H>> {
        self.entries.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Put ==
    /// Inserts `entry`, or replaces the handle of an existing one.
    ///
    /// A replaced entry keeps its `created_at` and access count (plus this
    /// visit); the old handle is returned so the caller decides when it is
    /// torn down. The previous scroll offset belongs to the old view and is
    /// discarded.
    pub fn put(&mut self, entry: CacheEntry<H>) -> Option<H> {
        let key = entry.key.clone();
        self.recency.touch(&key);

        match self.entries.get_mut(&key) {
            Some(existing) => {
                let CacheEntry {
                    path,
                    handle,
                    last_access_at,
                    metadata,
                    ..
                } = entry;
                existing.path = path;
                existing.last_access_at = last_access_at;
                existing.access_count += 1;
                existing.scroll_offset = None;
                existing.merge_metadata(&metadata);
                Some(std::mem::replace(&mut existing.handle, handle))
            }
            None => {
                self.entries.insert(key, entry);
                None
            }
        }
    }

    // == Touch ==
    /// Records a visit. Missing keys are ignored.
    pub fn touch(&mut self, key: &str) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.record_access();
                self.recency.touch(key);
                true
            }
            None => false,
        }
    }

    // == Remove ==
    /// Removes the entry along with its scroll offset and metadata.
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry<H>> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.recency.remove(key);
        }
        removed
    }

    // == Clear ==
    /// Drops every entry, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.recency.clear();
        count
    }

    // == Scroll Offsets ==
    pub fn set_scroll_offset(&mut self, key: &str, offset: f64) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.scroll_offset = Some(offset);
                true
            }
            None => false,
        }
    }

    pub fn scroll_offset(&self, key: &str) -> Option<f64> {
        self.entries.get(key).and_then(|entry| entry.scroll_offset)
    }

    // == Keys ==
    /// Cached keys, most recently visited first.
    pub fn keys(&self) -> Vec<String> {
        self.recency.newest_first().map(str::to_string).collect()
    }

    /// Visit order used by the eviction policy.
    pub fn recency(&self) -> &RecencyList {
        &self.recency
    }

    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry<H>> {
        self.entries.values()
    }

    // == Size ==
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H> Default for CacheStore<H> {
    fn default() -> Self {
        Self::new()
    }
}
