//! Cache Entry Module
//!
//! Defines a cached view together with its access bookkeeping.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

// == Cache Entry ==
/// A cached render handle and the metadata the cache keeps about it.
#[derive(Debug)]
pub struct CacheEntry<H> {
    /// Cache key this entry is stored under
    pub key: String,
    /// Navigation path of the latest visit
    pub path: String,
    /// The cached view, never inspected by the cache
    pub handle: H,
    /// When the entry was first inserted
    pub created_at: DateTime<Utc>,
    /// When the entry was last inserted or touched
    pub last_access_at: DateTime<Utc>,
    /// Number of visits, including the first one
    pub access_count: u64,
    /// Last scroll offset captured when the view was hidden
    pub scroll_offset: Option<f64>,
    /// Caller-supplied data (title, timestamps), never needed for correctness
    pub metadata: Map<String, Value>,
}

impl<H> CacheEntry<H> {
    // == Constructor ==
    /// Creates an entry for a first visit.
    pub fn new(key: impl Into<String>, path: impl Into<String>, handle: H) -> Self {
        let now = Utc::now();

        Self {
            key: key.into(),
            path: path.into(),
            handle,
            created_at: now,
            last_access_at: now,
            access_count: 1,
            scroll_offset: None,
            metadata: Map::new(),
        }
    }

    /// Attaches caller metadata.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    // == Record Access ==
    /// Marks the entry as visited again.
    pub fn record_access(&mut self) {
        self.last_access_at = Utc::now();
        self.access_count += 1;
    }

    // == Merge Metadata ==
    /// Overwrites metadata fields present in `metadata`, keeping the rest.
    pub fn merge_metadata(&mut self, metadata: &Map<String, Value>) {
        for (name, value) in metadata {
            self.metadata.insert(name.clone(), value.clone());
        }
    }
}
