//! API Handlers
//!
//! HTTP request handlers exposing one null-aware cache.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{CacheLookup, NullAwareCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, BatchDeleteResponse, BatchGetResponse, BatchPutRequest, BatchPutResponse,
    ClearResponse, ContainsResponse, DeleteResponse, FastPutResponse, GetResponse,
    HealthResponse, InfoResponse, KeysRequest, PutRequest, PutResponse,
};
use crate::store::MemoryStore;

/// Cache type served by the HTTP host.
pub type ServedCache = NullAwareCache<MemoryStore<String>>;

/// Application state shared across all handlers.
///
/// The facade needs no lock: it holds only its fixed configuration and
/// store handles, which synchronise internally.
#[derive(Clone)]
pub struct AppState {
    /// Backing store, shared with the eviction task
    pub store: MemoryStore<String>,
    /// The cache served over HTTP
    pub cache: Arc<ServedCache>,
}

impl AppState {
    /// Creates a new AppState serving `cache` over `store`.
    pub fn new(store: MemoryStore<String>, cache: ServedCache) -> Self {
        Self {
            store,
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens a fresh in-memory store and builds the cache with the configured
    /// name and flags.
    pub fn from_config(config: &Config) -> Self {
        let store = MemoryStore::new();
        let cache = NullAwareCache::new(
            &store,
            config.cache_name.clone(),
            config.ttl_control,
            config.cache_nulls,
        );
        Self::new(store, cache)
    }
}

fn check_key(key: &str) -> Result<()> {
    match validate_key(key) {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(()),
    }
}

/// Handler for PUT /cache/:key
///
/// Caches a value (or a null) with an optional TTL.
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<PutRequest>,
) -> Result<Json<PutResponse>> {
    check_key(&key)?;

    let ttl = req.ttl();
    let stored = state.cache.put_with_ttl(&key, req.value, ttl).await?;

    Ok(Json(PutResponse::new(key, stored.is_none())))
}

/// Handler for PUT /fast/:key
///
/// Caches a value (or a null) and reports whether the key was new.
pub async fn fast_put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<PutRequest>,
) -> Result<Json<FastPutResponse>> {
    check_key(&key)?;

    let ttl = req.ttl();
    let created = state.cache.fast_put_with_ttl(&key, req.value, ttl).await?;

    Ok(Json(FastPutResponse { key, created }))
}

/// Handler for GET /cache/:key
///
/// Returns the cached value, `null` for a cached null, or 404 on a miss.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    check_key(&key)?;

    match state.cache.get(&key).await? {
        CacheLookup::Value(value) => Ok(Json(GetResponse::new(key, Some(value)))),
        CacheLookup::Null => Ok(Json(GetResponse::new(key, None))),
        CacheLookup::Absent => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /contains/:key
pub async fn contains_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ContainsResponse>> {
    check_key(&key)?;

    let present = state.cache.contains_key(&key).await?;
    Ok(Json(ContainsResponse { key, present }))
}

/// Handler for DELETE /cache/:key
///
/// Removes the value and any null marker for the key.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    check_key(&key)?;

    let previous = state.cache.remove(&key).await?;
    Ok(Json(DeleteResponse::from_lookup(key, previous)))
}

/// Handler for POST /batch/get
pub async fn batch_get_handler(
    State(state): State<AppState>,
    Json(req): Json<KeysRequest>,
) -> Result<Json<BatchGetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let keys: HashSet<String> = req.keys.into_iter().collect();
    let entries = state.cache.get_all(&keys).await?;

    Ok(Json(BatchGetResponse { entries }))
}

/// Handler for POST /batch/put
pub async fn batch_put_handler(
    State(state): State<AppState>,
    Json(req): Json<BatchPutRequest>,
) -> Result<Json<BatchPutResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    let stored = req.entries.len();
    state.cache.put_all_with_ttl(req.entries, ttl).await?;

    Ok(Json(BatchPutResponse { stored }))
}

/// Handler for POST /batch/delete
pub async fn batch_delete_handler(
    State(state): State<AppState>,
    Json(req): Json<KeysRequest>,
) -> Result<Json<BatchDeleteResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let removed = state.cache.fast_remove(&req.keys).await?;
    Ok(Json(BatchDeleteResponse { removed }))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    state.cache.clear().await?;
    Ok(Json(ClearResponse::new(state.cache.name())))
}

/// Handler for GET /info
pub async fn info_handler(State(state): State<AppState>) -> Json<InfoResponse> {
    let cache = &state.cache;
    Json(InfoResponse {
        name: cache.name().to_string(),
        null_set_name: cache.null_set_name().map(str::to_string),
        ttl_control: cache.ttl_control(),
        cache_nulls: cache.cache_nulls(),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
