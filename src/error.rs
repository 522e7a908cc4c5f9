//! Error types for the null-aware cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

// == Cache Error Enum ==
/// Unified error type for the cache facade and its HTTP host.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A TTL-bearing write was requested on a cache built without TTL control
    #[error("TTL not supported for this cache instance: {cache}")]
    TtlNotSupported { cache: String },

    /// Failure reported by the backing store, passed through unchanged
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Key not cached
    #[error("Key not found: {0}")]
    NotFound(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::TtlNotSupported { .. } => StatusCode::BAD_REQUEST,
            CacheError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
