//! Browser Simulator
//!
//! An in-memory host for the view cache: pages are plain records, the
//! window is a single scroll container and [`BrowserSession`] plays the
//! router, handing every navigation to the cache.

use std::convert::Infallible;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::KeepAliveConfig;
use crate::error::Result;
use crate::keepalive::{
    KeepAlive, Navigation, NavigationKind, RenderHandle, RestoreOutcome, RestoreTicket, Viewport,
};

// == Page View ==
/// A mounted page.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    /// Mount sequence number, unique per session
    pub id: u64,
    pub path: String,
    pub mounted_at: DateTime<Utc>,
    pub visible: bool,
    /// Times the page was shown again from the cache
    pub show_count: u32,
    pub hide_count: u32,
}

impl PageView {
    pub fn mount(id: u64, path: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            mounted_at: Utc::now(),
            visible: true,
            show_count: 0,
            hide_count: 0,
        }
    }
}

impl RenderHandle for PageView {
    fn show(&mut self) {
        self.visible = true;
        self.show_count += 1;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.hide_count += 1;
    }
}

// == Window Viewport ==
/// The browser window's scroll position.
///
/// Swapping the visible page resets the offset and clears layout until the
/// next paint; scrolling before that is ignored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WindowViewport {
    offset: f64,
    laid_out: bool,
}

impl WindowViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user scrolled to `offset`.
    pub fn user_scroll(&mut self, offset: f64) {
        self.offset = offset.max(0.0);
    }

    /// A different page became visible.
    pub fn swap_view(&mut self) {
        self.offset = 0.0;
        self.laid_out = false;
    }

    /// Layout of the visible page completed.
    pub fn paint(&mut self) {
        self.laid_out = true;
    }
}

impl Viewport for WindowViewport {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn is_laid_out(&self) -> bool {
        self.laid_out
    }

    fn scroll_to(&mut self, offset: f64) {
        if self.laid_out {
            self.offset = offset.max(0.0);
        }
    }
}

// == Session Navigation ==
/// What one navigation did, without the page handle.
#[derive(Debug, Clone, Serialize)]
pub struct SessionNavigation {
    pub key: Option<String>,
    pub kind: NavigationKind,
    pub evicted: Vec<String>,
    /// Restore the host must run on the next paint
    pub restore: Option<RestoreTicket>,
    /// Frame the next paint belongs to
    pub frame: u64,
}

// == Browser Session ==
#[derive(Debug)]
pub struct BrowserSession {
    keepalive: KeepAlive<PageView>,
    viewport: WindowViewport,
    /// Visible page that was rendered fresh and is not cached
    uncached: Option<PageView>,
    next_page_id: u64,
    /// Bumped whenever a different page becomes visible
    frame: u64,
}

impl BrowserSession {
    pub fn new(keepalive: KeepAlive<PageView>) -> Self {
        Self {
            keepalive,
            viewport: WindowViewport::new(),
            uncached: None,
            next_page_id: 1,
            frame: 0,
        }
    }

    pub fn from_config(config: &KeepAliveConfig) -> Result<Self> {
        Ok(Self::new(KeepAlive::new(config)?))
    }

    // == Navigate ==
    pub fn navigate(&mut self, nav: &Navigation) -> Result<SessionNavigation> {
        let page_id = self.next_page_id;
        let previous = self.keepalive.active_key().map(str::to_string);

        let outcome = self.keepalive.navigate(nav, &self.viewport, |nav| {
            Ok::<_, Infallible>(PageView::mount(page_id, nav.path.as_str()))
        })?;

        let mounted = outcome.kind != NavigationKind::Hit;
        if mounted {
            self.next_page_id += 1;
        }

        let switched = outcome.kind == NavigationKind::Fresh
            || self.uncached.is_some()
            || previous != outcome.key;
        self.uncached = outcome.fresh;
        if switched {
            self.viewport.swap_view();
            self.frame += 1;
        }
        debug!(path = %nav.path, kind = ?outcome.kind, switched, "Navigation handled");

        Ok(SessionNavigation {
            key: outcome.key,
            kind: outcome.kind,
            evicted: outcome.evicted,
            restore: outcome.restore,
            frame: self.frame,
        })
    }

    // == Paint ==
    /// Completes layout of `frame` and runs the deferred restore, if any.
    ///
    /// A paint for a frame that was already replaced by another page leaves
    /// layout alone; its ticket is stale and gets dropped by the cache.
    pub fn paint(&mut self, frame: u64, ticket: Option<&RestoreTicket>) -> Option<RestoreOutcome> {
        if frame == self.frame {
            self.viewport.paint();
        } else {
            debug!(frame, current = self.frame, "Skipped paint for replaced page");
        }
        ticket.map(|ticket| self.keepalive.restore(ticket, &mut self.viewport))
    }

    // == Accessors ==
    pub fn keepalive(&self) -> &KeepAlive<PageView> {
        &self.keepalive
    }

    pub fn keepalive_mut(&mut self) -> &mut KeepAlive<PageView> {
        &mut self.keepalive
    }

    pub fn viewport(&self) -> &WindowViewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut WindowViewport {
        &mut self.viewport
    }

    /// Frame of the page currently on screen.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The page on screen, cached or not.
    pub fn current_page(&self) -> Option<&PageView> {
        self.uncached.as_ref().or_else(|| {
            self.keepalive
                .active_key()
                .and_then(|key| self.keepalive.entry(key))
                .map(|entry| &entry.handle)
        })
    }
}
