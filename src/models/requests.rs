//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Validates a single cache key.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

/// Converts an optional millisecond TTL into a write TTL.
///
/// Missing or non-positive values mean "no TTL".
fn ttl_from_millis(ttl_ms: Option<i64>) -> Duration {
    match ttl_ms {
        Some(ms) if ms > 0 => Duration::from_millis(ms as u64),
        _ => Duration::ZERO,
    }
}

/// Reads a nullable field that must still be present in the body.
fn required_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer)
}

/// Request body for PUT /cache/:key and PUT /fast/:key
///
/// # Fields
/// - `value`: The value to cache; required, `null` caches a null
/// - `ttl_ms`: Optional TTL in milliseconds; zero or negative means no TTL
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// The value to store
    #[serde(deserialize_with = "required_nullable")]
    pub value: Option<String>,
    /// Optional TTL in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<i64>,
}

impl PutRequest {
    /// TTL to apply, `Duration::ZERO` when none was requested.
    pub fn ttl(&self) -> Duration {
        ttl_from_millis(self.ttl_ms)
    }
}

/// Request body for POST /batch/get and POST /batch/delete
#[derive(Debug, Clone, Deserialize)]
pub struct KeysRequest {
    pub keys: Vec<String>,
}

impl KeysRequest {
    /// Validates every key in the request.
    pub fn validate(&self) -> Option<String> {
        self.keys.iter().find_map(|key| validate_key(key))
    }
}

/// Request body for POST /batch/put
#[derive(Debug, Clone, Deserialize)]
pub struct BatchPutRequest {
    /// Entries to cache; `null` values cache a null
    pub entries: HashMap<String, Option<String>>,
    /// Optional TTL in milliseconds applied to every real value
    #[serde(default)]
    pub ttl_ms: Option<i64>,
}

impl BatchPutRequest {
    pub fn ttl(&self) -> Duration {
        ttl_from_millis(self.ttl_ms)
    }

    /// Validates every key in the request.
    pub fn validate(&self) -> Option<String> {
        self.entries.keys().find_map(|key| validate_key(key))
    }
}
