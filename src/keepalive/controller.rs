//! Lifecycle Controller Module
//!
//! Runs the per-navigation state machine: decide between fresh render, cache
//! hit and cache miss, hide the outgoing view, admit the incoming one and
//! schedule its scroll restore.
//!
//! Per key: `Uninitialized → CachedActive ⇄ CachedInactive → (evicted | removed)`.
//! An evicted or removed key has no tombstone and reads as `Uninitialized`.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{BoxError, KeepAliveError, Result};
use crate::keepalive::{
    CacheCounters, CacheEntry, CachePolicy, CacheStats, CacheStore, EvictionPolicy, Navigation,
    RenderHandle, RestoreOutcome, RestoreTicket, RouteKeyResolver, ScrollPositionManager,
    Viewport,
};

// == View State ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// Not in the cache
    Uninitialized,
    /// Cached and visible
    CachedActive,
    /// Cached and hidden
    CachedInactive,
}

// == Navigation Kind ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    /// Existing handle reused
    Hit,
    /// New handle mounted and cached
    Miss,
    /// Non-cacheable path, new handle not stored
    Fresh,
}

// == Navigation Outcome ==
#[derive(Debug)]
pub struct NavigationOutcome<H> {
    /// Cache key of the new view, `None` for a fresh render
    pub key: Option<String>,
    pub kind: NavigationKind,
    /// Keys evicted to make room
    pub evicted: Vec<String>,
    /// Restore to run on the next paint
    pub restore: Option<RestoreTicket>,
    /// Handle of a fresh render, owned by the caller
    pub fresh: Option<H>,
}

// == Lifecycle Controller ==
#[derive(Debug)]
pub struct LifecycleController<H> {
    store: CacheStore<H>,
    eviction: EvictionPolicy,
    resolver: RouteKeyResolver,
    scroll: ScrollPositionManager,
    policy: CachePolicy,
    active: Option<String>,
    counters: CacheCounters,
}

impl<H: RenderHandle> LifecycleController<H> {
    // == Constructor ==
    /// Fails with `InvalidCapacity` when `max_cache` is zero.
    pub fn new(policy: CachePolicy, max_cache: usize, scroll_restoration: bool) -> Result<Self> {
        Ok(Self {
            store: CacheStore::new(),
            eviction: EvictionPolicy::new(max_cache)?,
            resolver: RouteKeyResolver::new(),
            scroll: ScrollPositionManager::new(scroll_restoration),
            policy,
            active: None,
            counters: CacheCounters::new(),
        })
    }

    /// Replaces the exact-match resolver, e.g. with a glob matcher.
    pub fn with_resolver(mut self, resolver: RouteKeyResolver) -> Self {
        self.resolver = resolver;
        self
    }

    // == Navigate ==
    /// Handles a navigation to `nav`.
    ///
    /// `create` is called at most once, before anything changes: when it
    /// fails the error is returned and the store, the active view and the
    /// counters are exactly as before.
    pub fn navigate<F, E>(
        &mut self,
        nav: &Navigation,
        viewport: &dyn Viewport,
        create: F,
    ) -> Result<NavigationOutcome<H>>
    where
        F: FnOnce(&Navigation) -> std::result::Result<H, E>,
        E: Into<BoxError>,
    {
        let Some(key) = self.resolver.resolve(nav, &self.policy) else {
            let handle = build_handle(&nav.path, nav, create)?;
            self.depart(viewport);
            self.counters.record_bypass();
            debug!(path = %nav.path, "Not cacheable, rendered fresh");
            return Ok(NavigationOutcome {
                key: None,
                kind: NavigationKind::Fresh,
                evicted: Vec::new(),
                restore: None,
                fresh: Some(handle),
            });
        };

        if self.active.as_deref() == Some(key.as_str()) {
            self.revisit(&key, nav);
            debug!(key = %key, "Re-entered active view");
            return Ok(NavigationOutcome {
                key: Some(key),
                kind: NavigationKind::Hit,
                evicted: Vec::new(),
                restore: None,
                fresh: None,
            });
        }

        if self.store.contains(&key) {
            self.depart(viewport);
            self.revisit(&key, nav);
            if let Some(entry) = self.store.get_mut(&key) {
                entry.handle.show();
            }
            self.active = Some(key.clone());
            let restore = self.scroll.schedule(&key);
            debug!(key = %key, "Cache hit, view reactivated");
            return Ok(NavigationOutcome {
                key: Some(key),
                kind: NavigationKind::Hit,
                evicted: Vec::new(),
                restore,
                fresh: None,
            });
        }

        let handle = build_handle(&key, nav, create)?;
        self.depart(viewport);

        let victims = self.eviction.admit(&self.store, &key, self.active.as_deref());
        let evicted = self.evict(victims);

        let entry = CacheEntry::new(key.as_str(), nav.path.as_str(), handle)
            .with_metadata(nav.metadata.clone());
        self.store.put(entry);
        self.active = Some(key.clone());
        self.counters.record_miss();
        let restore = self.scroll.schedule(&key);
        debug!(key = %key, size = self.store.size(), "Cache miss, view mounted");

        Ok(NavigationOutcome {
            key: Some(key),
            kind: NavigationKind::Miss,
            evicted,
            restore,
            fresh: None,
        })
    }

    /// Hides the active view and captures its offset. A view whose key the
    /// current policy rejects is dropped instead of hidden.
    fn depart(&mut self, viewport: &dyn Viewport) {
        self.scroll.cancel();

        let Some(previous) = self.active.take() else {
            return;
        };
        let still_cacheable = match self.store.get(&previous) {
            Some(entry) => self
                .resolver
                .is_cacheable(&entry.key, &entry.path, &self.policy),
            None => return,
        };

        if still_cacheable {
            self.scroll.snapshot(&mut self.store, &previous, viewport);
            if let Some(entry) = self.store.get_mut(&previous) {
                entry.handle.hide();
            }
            debug!(key = %previous, "View hidden");
        } else {
            self.store.remove(&previous);
            info!(key = %previous, "View dropped on departure, no longer cacheable");
        }
    }

    fn revisit(&mut self, key: &str, nav: &Navigation) {
        self.store.touch(key);
        if let Some(entry) = self.store.get_mut(key) {
            entry.path.clone_from(&nav.path);
            entry.merge_metadata(&nav.metadata);
        }
        self.counters.record_hit();
    }

    fn evict(&mut self, victims: Vec<String>) -> Vec<String> {
        for key in &victims {
            if self.store.remove(key).is_some() {
                self.scroll.cancel_for(key);
                self.counters.record_eviction();
                info!(key = %key, "Evicted least recently used view");
            }
        }
        victims
    }

    // == Restore ==
    /// Runs a deferred scroll restore. Stale tickets are dropped and counted.
    pub fn restore(&mut self, ticket: &RestoreTicket, viewport: &mut dyn Viewport) -> RestoreOutcome {
        let outcome = self
            .scroll
            .restore(ticket, self.active.as_deref(), &self.store, viewport);
        if outcome == RestoreOutcome::Stale {
            self.counters.record_dropped_restore();
            debug!(key = %ticket.key(), ticket = ticket.id(), "Dropped stale scroll restore");
        }
        outcome
    }

    // == Remove ==
    /// Removes `key`, even when it is the active view.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.store.remove(key).is_none() {
            return false;
        }

        self.scroll.cancel_for(key);
        if self.active.as_deref() == Some(key) {
            self.active = None;
        }
        info!(key, "Cache entry removed");
        true
    }

    // == Clear ==
    /// Drops every entry including the active one.
    pub fn clear(&mut self) -> usize {
        self.scroll.cancel();
        self.active = None;
        let removed = self.store.clear();
        info!(removed, "Cache cleared");
        removed
    }

    // == Capacity ==
    /// Changes the capacity and evicts down to it right away, sparing the
    /// active view. Returns the evicted keys.
    pub fn set_max_cache(&mut self, max_cache: usize) -> Result<Vec<String>> {
        self.eviction.set_max_cache(max_cache)?;
        let victims = self.eviction.overflow(&self.store, self.active.as_deref());
        let evicted = self.evict(victims);
        info!(max_cache, evicted = evicted.len(), "Cache capacity changed");
        Ok(evicted)
    }

    pub fn max_cache(&self) -> usize {
        self.eviction.max_cache()
    }

    // == Policy ==
    /// Installs a new policy and drops hidden entries it no longer admits.
    ///
    /// The active entry stays visible and is dropped when it is left.
    pub fn update_policy(&mut self, policy: CachePolicy) -> Vec<String> {
        self.policy = policy;

        let pruned: Vec<String> = self
            .store
            .entries()
            .filter(|entry| Some(entry.key.as_str()) != self.active.as_deref())
            .filter(|entry| {
                !self
                    .resolver
                    .is_cacheable(&entry.key, &entry.path, &self.policy)
            })
            .map(|entry| entry.key.clone())
            .collect();

        for key in &pruned {
            self.store.remove(key);
            self.scroll.cancel_for(key);
        }
        info!(pruned = pruned.len(), "Cache policy updated");
        pruned
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    pub fn set_scroll_restoration(&mut self, enabled: bool) {
        self.scroll.set_enabled(enabled);
    }

    pub fn scroll_restoration(&self) -> bool {
        self.scroll.is_enabled()
    }

    // == Queries ==
    pub fn state_of(&self, key: &str) -> ViewState {
        if !self.store.contains(key) {
            ViewState::Uninitialized
        } else if self.active.as_deref() == Some(key) {
            ViewState::CachedActive
        } else {
            ViewState::CachedInactive
        }
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn entry(&self, key: &str) -> Option<&CacheEntry<H>> {
        self.store.get(key)
    }

    pub fn active_handle_mut(&mut self) -> Option<&mut H> {
        let key = self.active.as_deref()?;
        self.store.get_mut(key).map(|entry| &mut entry.handle)
    }

    pub fn set_metadata(&mut self, key: &str, name: &str, value: Value) -> bool {
        match self.store.get_mut(key) {
            Some(entry) => {
                entry.metadata.insert(name.to_string(), value);
                true
            }
            None => false,
        }
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            count: self.store.size(),
            active_key: self.active.clone(),
            max_cache: self.eviction.max_cache(),
            keys: self.store.keys(),
            counters: self.counters.clone(),
        }
    }
}

fn build_handle<H, F, E>(key: &str, nav: &Navigation, create: F) -> Result<H>
where
    F: FnOnce(&Navigation) -> std::result::Result<H, E>,
    E: Into<BoxError>,
{
    create(nav).map_err(|error| {
        let source = error.into();
        warn!(key, error = %source, "Render handle creation failed");
        KeepAliveError::RenderCreation {
            key: key.to_string(),
            source,
        }
    })
}
