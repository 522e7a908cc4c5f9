//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the cache; also prefixes the null-marker set name
    pub cache_name: String,
    /// Whether writes may carry a per-entry TTL
    pub ttl_control: bool,
    /// Whether null values are remembered as cache hits
    pub cache_nulls: bool,
    /// HTTP server port
    pub server_port: u16,
    /// Background eviction task interval in seconds
    pub eviction_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_NAME` - Cache name (default: "cache")
    /// - `TTL_CONTROL` - Allow per-entry TTL writes (default: true)
    /// - `CACHE_NULLS` - Cache null values (default: true)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `EVICTION_INTERVAL` - Eviction frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_name: env::var("CACHE_NAME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.cache_name),
            ttl_control: env::var("TTL_CONTROL")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.ttl_control),
            cache_nulls: env::var("CACHE_NULLS")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.cache_nulls),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            eviction_interval: env::var("EVICTION_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.eviction_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_name: "cache".to_string(),
            ttl_control: true,
            cache_nulls: true,
            server_port: 3000,
            eviction_interval: 1,
        }
    }
}

/// Parses a boolean flag, accepting `true/false`, `1/0` and `yes/no`.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
