//! Deferred Scroll Restore Task
//!
//! A scroll offset can only be applied once the re-shown view is laid out,
//! so the restore runs one frame after the navigation that scheduled it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::keepalive::{RestoreOutcome, RestoreTicket};
use crate::simulator::BrowserSession;

/// Spawns a single-shot task that paints `frame` after `frame_interval` and
/// runs `ticket`, if any.
///
/// The task never repeats. When another page became visible in the meantime
/// the paint leaves layout alone and the stale restore is dropped.
///
/// # Example
/// ```ignore
/// let nav = session.write().await.navigate(&Navigation::new("/orders"))?;
/// spawn_deferred_restore(session.clone(), nav.frame, nav.restore, Duration::from_millis(16));
/// ```
pub fn spawn_deferred_restore(
    session: Arc<RwLock<BrowserSession>>,
    frame: u64,
    ticket: Option<RestoreTicket>,
    frame_interval: Duration,
) -> JoinHandle<Option<RestoreOutcome>> {
    tokio::spawn(async move {
        tokio::time::sleep(frame_interval).await;

        let outcome = {
            let mut guard = session.write().await;
            guard.paint(frame, ticket.as_ref())
        };

        match (&ticket, outcome) {
            (Some(ticket), Some(outcome)) => {
                debug!(key = %ticket.key(), ticket = ticket.id(), ?outcome, "Deferred restore ran");
            }
            _ => debug!(frame, "Frame painted"),
        }
        outcome
    })
}
