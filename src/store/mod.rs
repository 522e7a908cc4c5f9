//! Store Module
//!
//! Ports for the backing key-value store the cache facade sits in front of.
//!
//! A backend hands out named handles through [`StoreClient`]:
//! - a plain map ([`ValueStore`])
//! - an expiring map ([`TtlValueStore`]), the only handle that accepts per-entry TTLs
//! - an expiring set ([`NullMarkerStore`]) used to remember keys whose source value is null
//!
//! [`memory::MemoryStore`] is the in-process implementation of every port.

mod entry;
pub mod memory;

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use entry::StoredEntry;
pub use memory::{MemoryMap, MemoryMapCache, MemorySetCache, MemoryStore};

// == Store Error ==
/// Failures reported by a backing store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or rejected the command
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A value could not be encoded or decoded
    #[error("Codec error: {0}")]
    Codec(String),
}

/// Result type returned by store ports.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Value Store ==
/// Port for a named associative store holding real values.
#[async_trait]
pub trait ValueStore<V>: Send + Sync {
    /// Returns the value for `key`, if any.
    async fn get(&self, key: &str) -> StoreResult<Option<V>>;

    /// Upserts `value` with store-default retention and returns the previous value.
    async fn put(&self, key: &str, value: V) -> StoreResult<Option<V>>;

    /// Upserts every entry in a single round trip.
    async fn put_all(&self, entries: HashMap<String, V>) -> StoreResult<()>;

    /// Removes `key` and returns the value it held.
    async fn remove(&self, key: &str) -> StoreResult<Option<V>>;

    /// Fetches every present key of `keys` in a single round trip.
    async fn get_all(&self, keys: &HashSet<String>) -> StoreResult<HashMap<String, V>>;

    /// Removes `keys` in a single round trip and returns how many were present.
    async fn fast_remove(&self, keys: &[String]) -> StoreResult<u64>;

    /// Upserts `value` and returns true when `key` was not present before.
    async fn fast_put(&self, key: &str, value: V) -> StoreResult<bool>;

    async fn contains_key(&self, key: &str) -> StoreResult<bool>;

    async fn clear(&self) -> StoreResult<()>;
}

// == TTL Value Store ==
/// Port for an associative store that also supports per-entry expiration.
#[async_trait]
pub trait TtlValueStore<V>: ValueStore<V> {
    /// Upserts `value`, expiring it after `ttl`, and returns the previous value.
    async fn put_with_ttl(&self, key: &str, value: V, ttl: Duration) -> StoreResult<Option<V>>;

    /// Upserts `value` with a TTL and returns true when `key` was not present before.
    async fn fast_put_with_ttl(&self, key: &str, value: V, ttl: Duration) -> StoreResult<bool>;

    /// Upserts every entry with the same TTL in a single round trip.
    async fn put_all_with_ttl(&self, entries: HashMap<String, V>, ttl: Duration)
        -> StoreResult<()>;
}

// == Null Marker Store ==
/// Port for an expiring set of keys known to have a null source value.
#[async_trait]
pub trait NullMarkerStore: Send + Sync {
    /// Adds `key` with its own deadline. Returns true when the key was not present.
    async fn add(&self, key: &str, ttl: Duration) -> StoreResult<bool>;

    /// Adds every key with the same deadline in a single round trip.
    /// Returns how many keys were newly added.
    async fn add_all(&self, keys: &[String], ttl: Duration) -> StoreResult<u64>;

    async fn contains(&self, key: &str) -> StoreResult<bool>;

    /// Removes `key`. Returns true when it was present.
    async fn remove(&self, key: &str) -> StoreResult<bool>;

    /// Removes `keys` in a single round trip and returns how many were present.
    async fn remove_all(&self, keys: &[String]) -> StoreResult<u64>;

    /// Snapshot of every live key in the set.
    async fn read_all(&self) -> StoreResult<HashSet<String>>;

    async fn clear(&self) -> StoreResult<()>;
}

// == Store Client ==
/// Factory for named store handles, one per cache structure.
///
/// `map` and `map_cache` with the same name address the same data; only the
/// expiring handle exposes TTL-bearing writes.
pub trait StoreClient {
    type Value: Clone + Send + Sync + 'static;
    type Map: ValueStore<Self::Value> + 'static;
    type MapCache: TtlValueStore<Self::Value> + 'static;
    type SetCache: NullMarkerStore + 'static;

    /// Returns a plain map handle.
    fn map(&self, name: &str) -> Self::Map;

    /// Returns a map handle with per-entry TTL support.
    fn map_cache(&self, name: &str) -> Self::MapCache;

    /// Returns an expiring set handle.
    fn set_cache(&self, name: &str) -> Self::SetCache;
}
