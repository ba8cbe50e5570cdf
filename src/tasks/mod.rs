//! Background Tasks Module
//!
//! # Tasks
//! - Deferred restore: paints the new view and restores its scroll offset
//!   one frame after a navigation

mod restore;

pub use restore::spawn_deferred_restore;
