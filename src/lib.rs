//! KeepAlive - a view cache for navigated screens
//!
//! Keeps previously rendered views alive across navigation with LRU
//! eviction, an include/exclude policy and scroll restoration.

pub mod api;
pub mod config;
pub mod error;
pub mod keepalive;
pub mod models;
pub mod simulator;
pub mod tasks;

pub use api::AppState;
pub use config::{Config, KeepAliveConfig};
pub use error::{KeepAliveError, Result};
pub use keepalive::KeepAlive;
pub use simulator::BrowserSession;
pub use tasks::spawn_deferred_restore;
