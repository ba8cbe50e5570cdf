//! KeepAlive Facade Module
//!
//! The API application code talks to. Every call is routed through the
//! lifecycle controller; the facade keeps no cache state of its own.

use std::fmt;

use serde_json::Value;

use crate::config::KeepAliveConfig;
use crate::error::{BoxError, Result};
use crate::keepalive::{
    CacheEntry, CachePolicy, CacheStats, LifecycleController, Navigation, NavigationOutcome,
    RenderHandle, RestoreOutcome, RestoreTicket, RouteKeyResolver, StatePersistence, ViewState,
    Viewport,
};

// == KeepAlive ==
/// Bounded cache of live views keyed by navigation identity.
pub struct KeepAlive<H> {
    controller: LifecycleController<H>,
    persistence: Option<Box<dyn StatePersistence>>,
}

impl<H: RenderHandle> KeepAlive<H> {
    // == Constructor ==
    /// Fails with `InvalidCapacity` when `config.max_cache` is zero.
    pub fn new(config: &KeepAliveConfig) -> Result<Self> {
        config.validate()?;
        let controller = LifecycleController::new(
            config.policy(),
            config.max_cache,
            config.scroll_restoration,
        )?;

        Ok(Self {
            controller,
            persistence: None,
        })
    }

    /// Uses a custom pattern matcher for include/exclude.
    pub fn with_resolver(mut self, resolver: RouteKeyResolver) -> Self {
        self.controller = self.controller.with_resolver(resolver);
        self
    }

    /// Attaches a durable store for screen state.
    pub fn with_persistence(mut self, persistence: impl StatePersistence + 'static) -> Self {
        self.persistence = Some(Box::new(persistence));
        self
    }

    // == Navigation ==
    /// See [`LifecycleController::navigate`].
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
        self.controller.navigate(nav, viewport, create)
    }

    /// Runs a deferred scroll restore on the next paint.
    pub fn restore(&mut self, ticket: &RestoreTicket, viewport: &mut dyn Viewport) -> RestoreOutcome {
        self.controller.restore(ticket, viewport)
    }

    // == Queries ==
    pub fn is_cached(&self, key: &str) -> bool {
        self.controller.state_of(key) != ViewState::Uninitialized
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.controller.state_of(key) == ViewState::CachedActive
    }

    pub fn state_of(&self, key: &str) -> ViewState {
        self.controller.state_of(key)
    }

    pub fn active_key(&self) -> Option<&str> {
        self.controller.active_key()
    }

    /// Read-only view of a cached entry.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry<H>> {
        self.controller.entry(key)
    }

    pub fn active_handle_mut(&mut self) -> Option<&mut H> {
        self.controller.active_handle_mut()
    }

    pub fn get_stats(&self) -> CacheStats {
        self.controller.stats()
    }

    pub fn policy(&self) -> &CachePolicy {
        self.controller.policy()
    }

    pub fn scroll_restoration(&self) -> bool {
        self.controller.scroll_restoration()
    }

    // == Mutations ==
    pub fn remove_entry(&mut self, key: &str) -> bool {
        self.controller.remove(key)
    }

    pub fn clear_all(&mut self) -> usize {
        self.controller.clear()
    }

    /// Returns the keys evicted to fit the new capacity.
    pub fn set_max_cache(&mut self, max_cache: usize) -> Result<Vec<String>> {
        self.controller.set_max_cache(max_cache)
    }

    /// Returns the keys pruned because the new policy rejects them.
    pub fn update_policy(&mut self, policy: CachePolicy) -> Vec<String> {
        self.controller.update_policy(policy)
    }

    pub fn set_scroll_restoration(&mut self, enabled: bool) {
        self.controller.set_scroll_restoration(enabled);
    }

    pub fn set_metadata(&mut self, key: &str, name: &str, value: Value) -> bool {
        self.controller.set_metadata(key, name, value)
    }

    // == State Persistence ==
    /// No-op without a persistence backend.
    pub fn save_state(&self, key: &str, state: &Value) -> Result<()> {
        match &self.persistence {
            Some(persistence) => persistence.save(key, state),
            None => Ok(()),
        }
    }

    /// `Ok(None)` without a persistence backend.
    pub fn load_state(&self, key: &str) -> Result<Option<Value>> {
        match &self.persistence {
            Some(persistence) => persistence.load(key),
            None => Ok(None),
        }
    }

    pub fn forget_state(&self, key: &str) -> Result<()> {
        match &self.persistence {
            Some(persistence) => persistence.remove(key),
            None => Ok(()),
        }
    }
}

impl<H: fmt::Debug> fmt::Debug for KeepAlive<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeepAlive")
            .field("controller", &self.controller)
            .field("persistence", &self.persistence.is_some())
            .finish()
    }
}
