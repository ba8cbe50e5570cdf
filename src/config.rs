//! Configuration Module
//!
//! Loads the view cache and inspection server settings from environment
//! variables.

use std::env;

use serde::Deserialize;

use crate::error::{KeepAliveError, Result};
use crate::keepalive::{CachePolicy, DEFAULT_MAX_CACHE};

// == KeepAlive Config ==
/// Settings of the view cache itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeepAliveConfig {
    /// Paths or keys that may be cached; empty admits everything
    #[serde(default)]
    pub include: Vec<String>,
    /// Paths or keys that are never cached
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Maximum number of cached views, at least 1
    #[serde(default = "default_max_cache")]
    pub max_cache: usize,
    /// Whether scroll offsets are captured and restored
    #[serde(default = "default_scroll_restoration")]
    pub scroll_restoration: bool,
}

impl KeepAliveConfig {
    pub fn policy(&self) -> CachePolicy {
        CachePolicy::new(self.include.clone(), self.exclude.clone())
    }

    /// Rejects a capacity below one.
    pub fn validate(&self) -> Result<()> {
        if self.max_cache < 1 {
            return Err(KeepAliveError::InvalidCapacity(self.max_cache));
        }
        Ok(())
    }
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            max_cache: DEFAULT_MAX_CACHE,
            scroll_restoration: true,
        }
    }
}

fn default_max_cache() -> usize {
    DEFAULT_MAX_CACHE
}

fn default_scroll_restoration() -> bool {
    true
}

// == Server Config ==
/// Inspection server parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// View cache settings
    pub keepalive: KeepAliveConfig,
    /// HTTP server port
    pub server_port: u16,
    /// Delay before a deferred scroll restore fires, in milliseconds
    pub frame_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `KEEPALIVE_INCLUDE` - Comma separated cacheable paths (default: all)
    /// - `KEEPALIVE_EXCLUDE` - Comma separated never-cached paths (default: none)
    /// - `KEEPALIVE_MAX_CACHE` - Maximum cached views (default: 10)
    /// - `KEEPALIVE_SCROLL_RESTORATION` - `true`/`false` (default: true)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `FRAME_INTERVAL_MS` - Paint delay for scroll restores (default: 16)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            keepalive: KeepAliveConfig {
                include: env::var("KEEPALIVE_INCLUDE")
                    .map(|v| parse_list(&v))
                    .unwrap_or_default(),
                exclude: env::var("KEEPALIVE_EXCLUDE")
                    .map(|v| parse_list(&v))
                    .unwrap_or_default(),
                max_cache: env::var("KEEPALIVE_MAX_CACHE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|max: &usize| *max >= 1)
                    .unwrap_or(defaults.keepalive.max_cache),
                scroll_restoration: env::var("KEEPALIVE_SCROLL_RESTORATION")
                    .ok()
                    .and_then(|v| parse_flag(&v))
                    .unwrap_or(defaults.keepalive.scroll_restoration),
            },
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            frame_interval_ms: env::var("FRAME_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.frame_interval_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keepalive: KeepAliveConfig::default(),
            server_port: 3000,
            frame_interval_ms: 16,
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.keepalive.max_cache, 10);
        assert!(config.keepalive.scroll_restoration);
        assert!(config.keepalive.include.is_empty());
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.frame_interval_ms, 16);
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("KEEPALIVE_INCLUDE");
        env::remove_var("KEEPALIVE_EXCLUDE");
        env::remove_var("KEEPALIVE_MAX_CACHE");
        env::remove_var("KEEPALIVE_SCROLL_RESTORATION");
        env::remove_var("SERVER_PORT");
        env::remove_var("FRAME_INTERVAL_MS");

        let config = Config::from_env();
        assert_eq!(config.keepalive, KeepAliveConfig::default());
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.frame_interval_ms, 16);
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list(" /a, /b ,,"), vec!["/a", "/b"]);
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_keepalive_config_validate() {
        let mut config = KeepAliveConfig::default();
        assert!(config.validate().is_ok());

        config.max_cache = 0;
        assert!(matches!(
            config.validate(),
            Err(KeepAliveError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_keepalive_config_deserialize_defaults() {
        let config: KeepAliveConfig = serde_json::from_str(r#"{"exclude": ["/login"]}"#).unwrap();
        assert_eq!(config.exclude, vec!["/login"]);
        assert_eq!(config.max_cache, 10);
        assert!(config.scroll_restoration);
        assert_eq!(config.policy().exclude, vec!["/login"]);
    }
}
