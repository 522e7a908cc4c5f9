//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::HashMap;

use serde::Serialize;

use crate::cache::CacheLookup;

/// Response body for GET /cache/:key
///
/// `value` is `null` with `cached_null: true` for a cached null.
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub value: Option<String>,
    pub cached_null: bool,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            cached_null: value.is_none(),
            value,
        }
    }
}

/// Response body for PUT /cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    /// Success message
    pub message: String,
    pub key: String,
    /// Whether the write cached a null
    pub cached_null: bool,
}

impl PutResponse {
    pub fn new(key: impl Into<String>, cached_null: bool) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
            cached_null,
        }
    }
}

/// Response body for PUT /fast/:key
#[derive(Debug, Clone, Serialize)]
pub struct FastPutResponse {
    pub key: String,
    /// True when the write inserted a new key
    pub created: bool,
}

/// Response body for GET /contains/:key
#[derive(Debug, Clone, Serialize)]
pub struct ContainsResponse {
    pub key: String,
    pub present: bool,
}

/// Response body for DELETE /cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub key: String,
    /// The real value the key held, if any
    pub previous: Option<String>,
    /// Whether the key was cached as null
    pub cached_null: bool,
    /// Whether anything was removed
    pub removed: bool,
}

impl DeleteResponse {
    pub fn from_lookup(key: impl Into<String>, lookup: CacheLookup<String>) -> Self {
        let removed = lookup.is_present();
        let cached_null = lookup.is_null();
        Self {
            key: key.into(),
            previous: lookup.into_value(),
            cached_null,
            removed,
        }
    }
}

/// Response body for POST /batch/get
///
/// Only hits are listed; a `null` value is a cached null.
#[derive(Debug, Clone, Serialize)]
pub struct BatchGetResponse {
    pub entries: HashMap<String, Option<String>>,
}

/// Response body for POST /batch/put
#[derive(Debug, Clone, Serialize)]
pub struct BatchPutResponse {
    pub stored: usize,
}

/// Response body for POST /batch/delete
#[derive(Debug, Clone, Serialize)]
pub struct BatchDeleteResponse {
    /// Number of real values removed
    pub removed: u64,
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn new(cache: &str) -> Self {
        Self {
            message: format!("Cache '{}' cleared", cache),
        }
    }
}

/// Response body for GET /info
#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    pub name: String,
    pub null_set_name: Option<String>,
    pub ttl_control: bool,
    pub cache_nulls: bool,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
