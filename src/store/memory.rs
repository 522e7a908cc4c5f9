//! In-Memory Store Module
//!
//! Process-local backend implementing every store port. Named maps and sets live in
//! shared keyspaces; expired entries are invisible to reads and are dropped by
//! [`MemoryStore::purge_expired`], which the eviction task calls periodically.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    NullMarkerStore, StoreClient, StoreResult, StoredEntry, TtlValueStore, ValueStore,
};

type Namespace<T> = HashMap<String, StoredEntry<T>>;
type Keyspace<T> = Arc<RwLock<HashMap<String, Namespace<T>>>>;

// == Memory Store ==
/// In-memory store client. Cloning yields another handle to the same data.
pub struct MemoryStore<V> {
    /// Named maps, shared by plain and expiring map handles
    maps: Keyspace<V>,
    /// Named expiring sets
    sets: Keyspace<()>,
}

impl<V> MemoryStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            maps: Arc::new(RwLock::new(HashMap::new())),
            sets: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    // == Purge Expired ==
    /// Drops every expired entry from all maps and sets.
    ///
    /// Returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        let mut removed = 0;

        {
            let mut maps = self.maps.write().await;
            for namespace in maps.values_mut() {
                removed += purge_namespace(namespace);
            }
            maps.retain(|_, namespace| !namespace.is_empty());
        }

        let mut sets = self.sets.write().await;
        for namespace in sets.values_mut() {
            removed += purge_namespace(namespace);
        }
        sets.retain(|_, namespace| !namespace.is_empty());

        removed
    }

    // == Stored Entries ==
    /// Returns the number of physically stored entries, expired ones included.
    pub async fn stored_entries(&self) -> usize {
        let maps: usize = self.maps.read().await.values().map(HashMap::len).sum();
        let sets: usize = self.sets.read().await.values().map(HashMap::len).sum();
        maps + sets
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for MemoryStore<V> {
    fn clone(&self) -> Self {
        Self {
            maps: Arc::clone(&self.maps),
            sets: Arc::clone(&self.sets),
        }
    }
}

impl<V> fmt::Debug for MemoryStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

impl<V> StoreClient for MemoryStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    type Value = V;
    type Map = MemoryMap<V>;
    type MapCache = MemoryMapCache<V>;
    type SetCache = MemorySetCache;

    fn map(&self, name: &str) -> Self::Map {
        MemoryMap::new(name, Arc::clone(&self.maps))
    }

    fn map_cache(&self, name: &str) -> Self::MapCache {
        MemoryMap::new(name, Arc::clone(&self.maps))
    }

    fn set_cache(&self, name: &str) -> Self::SetCache {
        MemorySetCache {
            name: name.to_string(),
            sets: Arc::clone(&self.sets),
        }
    }
}

fn purge_namespace<T>(namespace: &mut Namespace<T>) -> usize {
    let before = namespace.len();
    namespace.retain(|_, entry| entry.is_live());
    before - namespace.len()
}

fn live_value<V: Clone>(entry: Option<&StoredEntry<V>>) -> Option<V> {
    entry.filter(|e| e.is_live()).map(|e| e.value.clone())
}

// == Map Handles ==
/// Capability marker for a map handle without TTL writes.
#[derive(Debug, Clone, Copy)]
pub struct Plain;

/// Capability marker for a map handle with TTL writes.
#[derive(Debug, Clone, Copy)]
pub struct Expiring;

/// Handle to one named map. `K` selects whether TTL writes are available.
pub struct MemoryMap<V, K = Plain> {
    name: String,
    maps: Keyspace<V>,
    _capability: PhantomData<K>,
}

/// Map handle with per-entry TTL support.
pub type MemoryMapCache<V> = MemoryMap<V, Expiring>;

impl<V, K> MemoryMap<V, K> {
    fn new(name: &str, maps: Keyspace<V>) -> Self {
        Self {
            name: name.to_string(),
            maps,
            _capability: PhantomData,
        }
    }
}

impl<V: Clone, K> MemoryMap<V, K> {
    /// Writes one entry and returns the previous live value.
    async fn write(&self, key: &str, value: V, ttl: Option<Duration>) -> Option<V> {
        let mut maps = self.maps.write().await;
        let namespace = maps.entry(self.name.clone()).or_default();
        let previous = namespace.insert(key.to_string(), StoredEntry::new(value, ttl));
        live_value(previous.as_ref())
    }

    async fn write_all(&self, entries: HashMap<String, V>, ttl: Option<Duration>) {
        let mut maps = self.maps.write().await;
        let namespace = maps.entry(self.name.clone()).or_default();
        for (key, value) in entries {
            namespace.insert(key, StoredEntry::new(value, ttl));
        }
    }
}

impl<V, K> fmt::Debug for MemoryMap<V, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryMap").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<V, K> ValueStore<V> for MemoryMap<V, K>
where
    V: Clone + Send + Sync + 'static,
    K: Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> StoreResult<Option<V>> {
        let maps = self.maps.read().await;
        Ok(live_value(maps.get(&self.name).and_then(|ns| ns.get(key))))
    }

    async fn put(&self, key: &str, value: V) -> StoreResult<Option<V>> {
        Ok(self.write(key, value, None).await)
    }

    async fn put_all(&self, entries: HashMap<String, V>) -> StoreResult<()> {
        self.write_all(entries, None).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<Option<V>> {
        let mut maps = self.maps.write().await;
        let previous = maps.get_mut(&self.name).and_then(|ns| ns.remove(key));
        Ok(live_value(previous.as_ref()))
    }

    async fn get_all(&self, keys: &HashSet<String>) -> StoreResult<HashMap<String, V>> {
        let maps = self.maps.read().await;
        let Some(namespace) = maps.get(&self.name) else {
            return Ok(HashMap::new());
        };

        Ok(keys
            .iter()
            .filter_map(|key| live_value(namespace.get(key)).map(|value| (key.clone(), value)))
            .collect())
    }

    async fn fast_remove(&self, keys: &[String]) -> StoreResult<u64> {
        let mut maps = self.maps.write().await;
        let Some(namespace) = maps.get_mut(&self.name) else {
            return Ok(0);
        };

        let removed = keys
            .iter()
            .filter_map(|key| namespace.remove(key))
            .filter(|entry| entry.is_live())
            .count();
        Ok(removed as u64)
    }

    async fn fast_put(&self, key: &str, value: V) -> StoreResult<bool> {
        Ok(self.write(key, value, None).await.is_none())
    }

    async fn contains_key(&self, key: &str) -> StoreResult<bool> {
        let maps = self.maps.read().await;
        Ok(maps
            .get(&self.name)
            .and_then(|ns| ns.get(key))
            .is_some_and(StoredEntry::is_live))
    }

    async fn clear(&self) -> StoreResult<()> {
        self.maps.write().await.remove(&self.name);
        Ok(())
    }
}

#[async_trait]
impl<V> TtlValueStore<V> for MemoryMapCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn put_with_ttl(&self, key: &str, value: V, ttl: Duration) -> StoreResult<Option<V>> {
        Ok(self.write(key, value, Some(ttl)).await)
    }

    async fn fast_put_with_ttl(&self, key: &str, value: V, ttl: Duration) -> StoreResult<bool> {
        Ok(self.write(key, value, Some(ttl)).await.is_none())
    }

    async fn put_all_with_ttl(
        &self,
        entries: HashMap<String, V>,
        ttl: Duration,
    ) -> StoreResult<()> {
        self.write_all(entries, Some(ttl)).await;
        Ok(())
    }
}

// == Set Handle ==
/// Handle to one named expiring set.
#[derive(Clone)]
pub struct MemorySetCache {
    name: String,
    sets: Keyspace<()>,
}

impl fmt::Debug for MemorySetCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySetCache").field("name", &self.name).finish()
    }
}

#[async_trait]
impl NullMarkerStore for MemorySetCache {
    async fn add(&self, key: &str, ttl: Duration) -> StoreResult<bool> {
        let mut sets = self.sets.write().await;
        let namespace = sets.entry(self.name.clone()).or_default();
        let previous = namespace.insert(key.to_string(), StoredEntry::new((), Some(ttl)));
        Ok(!previous.is_some_and(|entry| entry.is_live()))
    }

    async fn add_all(&self, keys: &[String], ttl: Duration) -> StoreResult<u64> {
        let mut sets = self.sets.write().await;
        let namespace = sets.entry(self.name.clone()).or_default();
        let added = keys
            .iter()
            .filter(|key| {
                let previous = namespace.insert((*key).clone(), StoredEntry::new((), Some(ttl)));
                !previous.is_some_and(|entry| entry.is_live())
            })
            .count();
        Ok(added as u64)
    }

    async fn contains(&self, key: &str) -> StoreResult<bool> {
        let sets = self.sets.read().await;
        Ok(sets
            .get(&self.name)
            .and_then(|ns| ns.get(key))
            .is_some_and(StoredEntry::is_live))
    }

    async fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut sets = self.sets.write().await;
        Ok(sets
            .get_mut(&self.name)
            .and_then(|ns| ns.remove(key))
            .is_some_and(|entry| entry.is_live()))
    }

    async fn remove_all(&self, keys: &[String]) -> StoreResult<u64> {
        let mut sets = self.sets.write().await;
        let Some(namespace) = sets.get_mut(&self.name) else {
            return Ok(0);
        };

        let removed = keys
            .iter()
            .filter_map(|key| namespace.remove(key))
            .filter(|entry| entry.is_live())
            .count();
        Ok(removed as u64)
    }

    async fn read_all(&self) -> StoreResult<HashSet<String>> {
        let sets = self.sets.read().await;
        Ok(sets
            .get(&self.name)
            .map(|ns| {
                ns.iter()
                    .filter(|(_, entry)| entry.is_live())
                    .map(|(key, _)| key.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn clear(&self) -> StoreResult<()> {
        self.sets.write().await.remove(&self.name);
        Ok(())
    }
}
