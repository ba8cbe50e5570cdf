//! Route Key Resolver Module
//!
//! Turns a navigation into a cache key, or into nothing when the
//! include/exclude policy says the screen must not be kept alive.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// == Navigation ==
/// Identity of one navigation as supplied by the router.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    /// Path being navigated to
    pub path: String,
    /// Explicit cache key, takes precedence over `path`
    pub cache_key: Option<String>,
    /// Caller metadata copied onto the cache entry
    pub metadata: Map<String, Value>,
}

impl Navigation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Stores this navigation under `key` instead of its path.
    ///
    /// Several paths can share one slot this way, or one path can be split
    /// into several slots.
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }

    pub fn with_metadata(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(name.into(), value.into());
        self
    }

    /// The key this navigation would be stored under if it is cacheable.
    pub fn candidate_key(&self) -> &str {
        self.cache_key.as_deref().unwrap_or(&self.path)
    }
}

// == Cache Policy ==
/// Include/exclude lists deciding which screens are kept alive.
///
/// An empty `include` admits everything. `exclude` always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl CachePolicy {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }
}

// == Route Matcher ==
/// Decides whether a policy pattern matches a path or key.
///
/// Exact string comparison is the default. Glob or regex matching can be
/// plugged in through this trait.
pub trait RouteMatcher: Send + Sync {
    fn matches(&self, pattern: &str, candidate: &str) -> bool;
}

/// Pattern and candidate must be equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl RouteMatcher for ExactMatch {
    fn matches(&self, pattern: &str, candidate: &str) -> bool {
        pattern == candidate
    }
}

// == Route Key Resolver ==
pub struct RouteKeyResolver {
    matcher: Box<dyn RouteMatcher>,
}

impl RouteKeyResolver {
    pub fn new() -> Self {
        Self::with_matcher(ExactMatch)
    }

    pub fn with_matcher(matcher: impl RouteMatcher + 'static) -> Self {
        Self {
            matcher: Box::new(matcher),
        }
    }

    // == Resolve ==
    /// Returns the cache key for `nav`, or `None` when it must render fresh.
    ///
    /// Patterns are checked against both the path and the explicit key, so an
    /// excluded path stays excluded even when the caller overrides its key.
    pub fn resolve(&self, nav: &Navigation, policy: &CachePolicy) -> Option<String> {
        let key = nav.candidate_key();
        if self.is_cacheable(key, &nav.path, policy) {
            Some(key.to_string())
        } else {
            None
        }
    }

    // == Is Cacheable ==
    /// Applies the policy to an already stored `(key, path)` pair.
    pub fn is_cacheable(&self, key: &str, path: &str, policy: &CachePolicy) -> bool {
        if key.is_empty() {
            return false;
        }
        if self.matches_any(&policy.exclude, key, path) {
            return false;
        }
        policy.include.is_empty() || self.matches_any(&policy.include, key, path)
    }

    fn matches_any(&self, patterns: &[String], key: &str, path: &str) -> bool {
        patterns
            .iter()
            .any(|p| self.matcher.matches(p, path) || self.matcher.matches(p, key))
    }
}

impl Default for RouteKeyResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RouteKeyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteKeyResolver").finish_non_exhaustive()
    }
}
