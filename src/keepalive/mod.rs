//! KeepAlive Module
//!
//! Keeps previously rendered views alive across navigation: a bounded LRU
//! cache of render handles, an include/exclude policy, a show/hide lifecycle
//! and scroll restoration on re-activation.

mod controller;
mod entry;
mod eviction;
mod facade;
mod handle;
mod lru;
mod persist;
mod resolver;
mod scroll;
mod stats;
mod store;


// Re-export public types
pub use controller::{LifecycleController, NavigationKind, NavigationOutcome, ViewState};
pub use entry::CacheEntry;
pub use eviction::EvictionPolicy;
pub use facade::KeepAlive;
pub use handle::{RenderHandle, Viewport};
pub use lru::RecencyList;
pub use persist::{JsonFilePersistence, MemoryPersistence, StatePersistence};
pub use resolver::{CachePolicy, ExactMatch, Navigation, RouteKeyResolver, RouteMatcher};
pub use scroll::{RestoreOutcome, RestoreTicket, ScrollPositionManager};
pub use stats::{CacheCounters, CacheStats};
pub use store::CacheStore;

// == Public Constants ==
/// Number of views kept alive when no capacity is configured
pub const DEFAULT_MAX_CACHE: usize = 10;
