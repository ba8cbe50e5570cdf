//! Scroll Position Module
//!
//! Captures the viewport offset of a view when it is hidden and puts it back
//! one paint after the view is shown again.

use serde::Serialize;
use tracing::debug;

use crate::keepalive::{CacheStore, Viewport};

// == Restore Ticket ==
/// A scheduled, single-shot scroll restore.
///
/// Only the most recently scheduled ticket is live. Any navigation cancels
/// it, so a ticket that fires after its view was deactivated is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreTicket {
    id: u64,
    key: String,
}

impl RestoreTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

// == Restore Outcome ==
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "offset", rename_all = "snake_case")]
pub enum RestoreOutcome {
    /// The stored offset was applied
    Applied(f64),
    /// The key has no stored offset
    NothingToRestore,
    /// The ticket was cancelled or its key is no longer active
    Stale,
    /// Scroll restoration is turned off
    Disabled,
    /// The view is not laid out yet; the ticket stays pending
    NotLaidOut,
}

// == Scroll Position Manager ==
#[derive(Debug)]
pub struct ScrollPositionManager {
    enabled: bool,
    pending: Option<RestoreTicket>,
    next_id: u64,
}

impl ScrollPositionManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            pending: None,
            next_id: 1,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turning restoration off also cancels a pending restore.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pending = None;
        }
    }

    pub fn pending(&self) -> Option<&RestoreTicket> {
        self.pending.as_ref()
    }

    // == Snapshot ==
    /// Stores the current viewport offset on the entry for `key`.
    ///
    /// Must run while `key` is still the visible view.
    pub fn snapshot<H>(
        &self,
        store: &mut CacheStore<H>,
        key: &str,
        viewport: &dyn Viewport,
    ) -> Option<f64> {
        if !self.enabled {
            return None;
        }

        let offset = viewport.scroll_offset();
        if store.set_scroll_offset(key, offset) {
            debug!(key, offset, "Scroll offset captured");
            Some(offset)
        } else {
            None
        }
    }

    // == Schedule ==
    /// Schedules a restore for `key` on the next paint, replacing any
    /// restore still pending.
    pub fn schedule(&mut self, key: &str) -> Option<RestoreTicket> {
        if !self.enabled {
            return None;
        }

        let ticket = RestoreTicket {
            id: self.next_id,
            key: key.to_string(),
        };
        self.next_id += 1;
        self.pending = Some(ticket.clone());
        Some(ticket)
    }

    // == Cancel ==
    pub fn cancel(&mut self) -> Option<RestoreTicket> {
        self.pending.take()
    }

    /// Cancels the pending restore if it targets `key`.
    pub fn cancel_for(&mut self, key: &str) -> bool {
        if self.pending.as_ref().is_some_and(|t| t.key == key) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    // == Restore ==
    /// Applies the offset stored for the ticket's key.
    ///
    /// `active_key` is the key visible when the deferred callback runs; a
    /// mismatch means the view was deactivated in the meantime.
    pub fn restore<H>(
        &mut self,
        ticket: &RestoreTicket,
        active_key: Option<&str>,
        store: &CacheStore<H>,
        viewport: &mut dyn Viewport,
    ) -> RestoreOutcome {
        if !self.enabled {
            return RestoreOutcome::Disabled;
        }

        let is_live = self.pending.as_ref() == Some(ticket);
        if !is_live || active_key != Some(ticket.key.as_str()) {
            if is_live {
                self.pending = None;
            }
            return RestoreOutcome::Stale;
        }

        let Some(offset) = store.scroll_offset(&ticket.key) else {
            self.pending = None;
            return RestoreOutcome::NothingToRestore;
        };

        if !viewport.is_laid_out() {
            return RestoreOutcome::NotLaidOut;
        }

        viewport.scroll_to(offset);
        self.pending = None;
        debug!(key = %ticket.key, offset, "Scroll offset restored");
        RestoreOutcome::Applied(offset)
    }
}

impl Default for ScrollPositionManager {
    fn default() -> Self {
        Self::new(true)
    }
}
