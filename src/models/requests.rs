//! Request DTOs for the inspection API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::keepalive::{CachePolicy, Navigation};

/// Request body for POST /navigate
#[derive(Debug, Clone, Deserialize)]
pub struct NavigateRequest {
    /// Path being navigated to
    pub path: String,
    /// Optional explicit cache key
    #[serde(default)]
    pub cache_key: Option<String>,
    /// Optional page title stored as entry metadata
    #[serde(default)]
    pub title: Option<String>,
}

impl NavigateRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.path.is_empty() {
            return Some("Path cannot be empty".to_string());
        }
        if !self.path.starts_with('/') {
            return Some("Path must start with '/'".to_string());
        }
        if self.cache_key.as_deref() == Some("") {
            return Some("Cache key cannot be empty".to_string());
        }
        None
    }

    pub fn to_navigation(&self) -> Navigation {
        let mut nav = Navigation::new(self.path.as_str());
        if let Some(key) = &self.cache_key {
            nav = nav.with_cache_key(key.as_str());
        }
        if let Some(title) = &self.title {
            nav = nav.with_metadata("title", title.as_str());
        }
        nav
    }
}

/// Request body for PUT /max-cache
#[derive(Debug, Clone, Deserialize)]
pub struct MaxCacheRequest {
    pub max_cache: usize,
}

/// Request body for PUT /policy
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyRequest {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl From<PolicyRequest> for CachePolicy {
    fn from(req: PolicyRequest) -> Self {
        CachePolicy::new(req.include, req.exclude)
    }
}

/// Request body for PUT /viewport
#[derive(Debug, Clone, Deserialize)]
pub struct ViewportRequest {
    /// Scroll offset the user moved to
    pub offset: f64,
}

impl ViewportRequest {
    pub fn validate(&self) -> Option<String> {
        if !self.offset.is_finite() || self.offset < 0.0 {
            return Some("Offset must be a non-negative number".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_request_deserialize() {
        let json = r#"{"path": "/orders"}"#;
        let req: NavigateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.path, "/orders");
        assert!(req.cache_key.is_none());
        assert!(req.title.is_none());
    }

    #[test]
    fn test_navigate_request_to_navigation() {
        let json = r#"{"path": "/orders/7", "cache_key": "order", "title": "Order 7"}"#;
        let req: NavigateRequest = serde_json::from_str(json).unwrap();

        let nav = req.to_navigation();
        assert_eq!(nav.candidate_key(), "order");
        assert_eq!(nav.metadata["title"], "Order 7");
    }

    #[test]
    fn test_validate_navigate_request() {
        let empty = NavigateRequest {
            path: "".to_string(),
            cache_key: None,
            title: None,
        };
        assert!(empty.validate().is_some());

        let relative = NavigateRequest {
            path: "orders".to_string(),
            cache_key: None,
            title: None,
        };
        assert!(relative.validate().is_some());

        let blank_key = NavigateRequest {
            path: "/orders".to_string(),
            cache_key: Some(String::new()),
            title: None,
        };
        assert!(blank_key.validate().is_some());

        let valid = NavigateRequest {
            path: "/orders".to_string(),
            cache_key: None,
            title: None,
        };
        assert!(valid.validate().is_none());
    }

    #[test]
    fn test_policy_request_defaults() {
        let req: PolicyRequest = serde_json::from_str(r#"{"exclude": ["/login"]}"#).unwrap();
        let policy: CachePolicy = req.into();
        assert!(policy.include.is_empty());
        assert_eq!(policy.exclude, vec!["/login"]);
    }

    #[test]
    fn test_viewport_request_validate() {
        assert!(ViewportRequest { offset: -1.0 }.validate().is_some());
        assert!(ViewportRequest { offset: 120.5 }.validate().is_none());
    }
}
