//! Recency Module
//!
//! Keeps cache keys ordered by their last visit.

use std::collections::VecDeque;

// == Recency List ==
/// Visit order of cached keys.
///
/// - Front = most recently visited
/// - Back = least recently visited
///
/// Two keys touched within the same millisecond still get a strict order,
/// so ties on `last_access_at` resolve to the older insertion first.
#[derive(Debug, Default)]
pub struct RecencyList {
    order: VecDeque<String>,
}

impl RecencyList {
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Moves `key` to the most recent position, inserting it if needed.
    pub fn touch(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Iteration ==
    /// Keys from least to most recently visited.
    pub fn oldest_first(&self) -> impl Iterator<Item = &str> {
        self.order.iter().rev().map(String::as_str)
    }

    /// Keys from most to least recently visited.
    pub fn newest_first(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
