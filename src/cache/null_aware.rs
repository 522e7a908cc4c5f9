//! Null-Aware Cache Module
//!
//! Facade over a value map and an optional null-marker set.
//!
//! A key is either absent, holds a real value in the value map, or is marked in
//! the null-marker set as "source value is null". Writes keep the two structures
//! mutually exclusive by cleaning up the other structure after each write. The
//! pair is not updated atomically: a concurrent reader may briefly observe a key
//! in both structures or in neither.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::CacheLookup;
use crate::error::{CacheError, Result};
use crate::store::{NullMarkerStore, StoreClient, TtlValueStore, ValueStore};

// == Public Constants ==
/// Lifetime of a null marker, independent of any TTL passed to a write.
pub const NULL_MARKER_TTL: Duration = Duration::from_secs(5 * 60);

/// Suffix appended to the cache name to derive the null-marker set name.
pub const NULL_SET_SUFFIX: &str = "_null_value_key_set";

/// Truncates `ttl` to whole milliseconds; `None` when nothing remains.
fn whole_millis(ttl: Duration) -> Option<Duration> {
    match u64::try_from(ttl.as_millis()) {
        Ok(0) => None,
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => Some(Duration::from_millis(u64::MAX)),
    }
}

/// Value map handle; only the expiring variant accepts TTL writes.
enum ValueHandle<M, T> {
    Plain(M),
    Expiring(T),
}

// == Null-Aware Cache ==
/// Named cache distinguishing "not cached" from "cached as null".
///
/// The configuration is fixed at construction and the facade keeps no other
/// state, so a shared reference can serve concurrent callers.
pub struct NullAwareCache<C: StoreClient> {
    name: String,
    values: ValueHandle<C::Map, C::MapCache>,
    /// Present only when null caching is enabled
    null_keys: Option<(String, C::SetCache)>,
}

impl<C: StoreClient> NullAwareCache<C> {
    // == Constructor ==
    /// Creates a cache named `name` over `client`.
    ///
    /// With `ttl_control` the value map is opened with per-entry TTL support.
    /// With `cache_nulls` a marker set named `<name>_null_value_key_set` is
    /// opened; otherwise no marker set exists and null writes are no-ops.
    pub fn new(client: &C, name: impl Into<String>, ttl_control: bool, cache_nulls: bool) -> Self {
        let name = name.into();

        let values = if ttl_control {
            ValueHandle::Expiring(client.map_cache(&name))
        } else {
            ValueHandle::Plain(client.map(&name))
        };

        let null_keys = cache_nulls.then(|| {
            let set_name = format!("{name}{NULL_SET_SUFFIX}");
            let set = client.set_cache(&set_name);
            (set_name, set)
        });

        Self {
            name,
            values,
            null_keys,
        }
    }

    // == Accessors ==
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the null-marker set, when null caching is enabled.
    pub fn null_set_name(&self) -> Option<&str> {
        self.null_keys.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn ttl_control(&self) -> bool {
        matches!(self.values, ValueHandle::Expiring(_))
    }

    pub fn cache_nulls(&self) -> bool {
        self.null_keys.is_some()
    }

    fn values(&self) -> &dyn ValueStore<C::Value> {
        match &self.values {
            ValueHandle::Plain(map) => map,
            ValueHandle::Expiring(map) => map,
        }
    }

    fn expiring(&self) -> Result<&C::MapCache> {
        match &self.values {
            ValueHandle::Expiring(map) => Ok(map),
            ValueHandle::Plain(_) => {
                warn!(cache = %self.name, "Rejected TTL write on cache without TTL control");
                Err(CacheError::TtlNotSupported {
                    cache: self.name.clone(),
                })
            }
        }
    }

    fn markers(&self) -> Option<&C::SetCache> {
        self.null_keys.as_ref().map(|(_, set)| set)
    }

    // == Contains Key ==
    /// Returns true when `key` holds a real value or is cached as null.
    pub async fn contains_key(&self, key: &str) -> Result<bool> {
        if self.values().contains_key(key).await? {
            return Ok(true);
        }

        match self.markers() {
            Some(markers) => Ok(markers.contains(key).await?),
            None => Ok(false),
        }
    }

    // == Get ==
    /// Reads `key`, reporting a cached null as a hit distinct from a miss.
    pub async fn get(&self, key: &str) -> Result<CacheLookup<C::Value>> {
        if let Some(value) = self.values().get(key).await? {
            return Ok(CacheLookup::Value(value));
        }

        if let Some(markers) = self.markers() {
            if markers.contains(key).await? {
                return Ok(CacheLookup::Null);
            }
        }

        Ok(CacheLookup::Absent)
    }

    // == Put ==
    /// Caches `value` for `key` with store-default retention.
    ///
    /// `None` caches a null marker (or does nothing when null caching is off).
    /// Returns the value that was passed in.
    pub async fn put(&self, key: &str, value: Option<C::Value>) -> Result<Option<C::Value>> {
        match value {
            Some(value) => {
                self.values().put(key, value.clone()).await?;
                self.clear_null_marker(key).await?;
                Ok(Some(value))
            }
            None => {
                self.mark_null(key).await?;
                Ok(None)
            }
        }
    }

    /// Caches `value` for `key`, expiring a real value after `ttl`.
    ///
    /// TTLs have millisecond granularity: a `ttl` under one millisecond behaves
    /// like [`put`](Self::put). Null markers always use
    /// [`NULL_MARKER_TTL`]. A real value with a non-zero `ttl` on a cache
    /// without TTL control fails with [`CacheError::TtlNotSupported`] and
    /// leaves both structures untouched.
    pub async fn put_with_ttl(
        &self,
        key: &str,
        value: Option<C::Value>,
        ttl: Duration,
    ) -> Result<Option<C::Value>> {
        let Some(ttl) = whole_millis(ttl) else {
            return self.put(key, value).await;
        };

        match value {
            Some(value) => {
                self.expiring()?.put_with_ttl(key, value.clone(), ttl).await?;
                self.clear_null_marker(key).await?;
                Ok(Some(value))
            }
            None => {
                self.mark_null(key).await?;
                Ok(None)
            }
        }
    }

    // == Fast Put ==
    /// Like [`put`](Self::put), but returns whether the write inserted a new key.
    ///
    /// For a real value this is the value map's answer; for a null it is the
    /// marker set's answer, or true when null caching is off.
    pub async fn fast_put(&self, key: &str, value: Option<C::Value>) -> Result<bool> {
        match value {
            Some(value) => {
                let created = self.values().fast_put(key, value).await?;
                self.clear_null_marker(key).await?;
                Ok(created)
            }
            None => self.mark_null(key).await,
        }
    }

    /// Like [`put_with_ttl`](Self::put_with_ttl), but returns whether the write
    /// inserted a new key.
    pub async fn fast_put_with_ttl(
        &self,
        key: &str,
        value: Option<C::Value>,
        ttl: Duration,
    ) -> Result<bool> {
        let Some(ttl) = whole_millis(ttl) else {
            return self.fast_put(key, value).await;
        };

        match value {
            Some(value) => {
                let created = self.expiring()?.fast_put_with_ttl(key, value, ttl).await?;
                self.clear_null_marker(key).await?;
                Ok(created)
            }
            None => self.mark_null(key).await,
        }
    }

    // == Put All ==
    /// Caches every entry with store-default retention.
    ///
    /// Real values are written in one value-map round trip and nulls in one
    /// marker-set round trip.
    pub async fn put_all(&self, entries: HashMap<String, Option<C::Value>>) -> Result<()> {
        self.write_all(entries, None).await
    }

    /// Caches every entry, expiring real values after `ttl`.
    ///
    /// A `ttl` under one millisecond behaves like [`put_all`](Self::put_all). The TTL capability
    /// is checked before anything is written.
    pub async fn put_all_with_ttl(
        &self,
        entries: HashMap<String, Option<C::Value>>,
        ttl: Duration,
    ) -> Result<()> {
        self.write_all(entries, whole_millis(ttl)).await
    }

    async fn write_all(
        &self,
        entries: HashMap<String, Option<C::Value>>,
        ttl: Option<Duration>,
    ) -> Result<()> {
        let mut values = HashMap::with_capacity(entries.len());
        let mut nulls = Vec::new();
        for (key, value) in entries {
            match value {
                Some(value) => {
                    values.insert(key, value);
                }
                None => nulls.push(key),
            }
        }
        let real_keys: Vec<String> = values.keys().cloned().collect();

        if !values.is_empty() {
            match ttl {
                Some(ttl) => self.expiring()?.put_all_with_ttl(values, ttl).await?,
                None => self.values().put_all(values).await?,
            }
        }

        let Some(markers) = self.markers() else {
            return Ok(());
        };

        if !real_keys.is_empty() {
            markers.remove_all(&real_keys).await?;
        }
        if !nulls.is_empty() {
            markers.add_all(&nulls, NULL_MARKER_TTL).await?;
            self.values().fast_remove(&nulls).await?;
            debug!(cache = %self.name, count = nulls.len(), "Cached null markers");
        }

        Ok(())
    }

    // == Remove ==
    /// Removes `key` from both structures and reports what it held.
    pub async fn remove(&self, key: &str) -> Result<CacheLookup<C::Value>> {
        let previous = self.values().remove(key).await?;

        let was_null = match self.markers() {
            Some(markers) => markers.remove(key).await?,
            None => false,
        };

        Ok(match previous {
            Some(value) => CacheLookup::Value(value),
            None if was_null => CacheLookup::Null,
            None => CacheLookup::Absent,
        })
    }

    // == Fast Remove ==
    /// Removes every key from both structures.
    ///
    /// Returns how many real values were removed; cleared null markers are
    /// not counted.
    pub async fn fast_remove(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }

        let removed = self.values().fast_remove(keys).await?;
        if let Some(markers) = self.markers() {
            markers.remove_all(keys).await?;
        }

        Ok(removed)
    }

    // == Get All ==
    /// Reads every key of `keys`.
    ///
    /// A key in the result is a hit: `Some(v)` for a real value, `None` for a
    /// cached null. Keys missing from the result are cache misses. The marker
    /// set is read (once, as a snapshot) only when some key has no real value.
    pub async fn get_all(
        &self,
        keys: &HashSet<String>,
    ) -> Result<HashMap<String, Option<C::Value>>> {
        let mut found: HashMap<String, Option<C::Value>> = self
            .values()
            .get_all(keys)
            .await?
            .into_iter()
            .map(|(key, value)| (key, Some(value)))
            .collect();

        if found.len() == keys.len() {
            return Ok(found);
        }

        if let Some(markers) = self.markers() {
            let null_keys = markers.read_all().await?;
            for key in keys {
                if !found.contains_key(key) && null_keys.contains(key) {
                    found.insert(key.clone(), None);
                }
            }
        }

        Ok(found)
    }

    // == Clear ==
    /// Empties the value map and, when present, the marker set.
    pub async fn clear(&self) -> Result<()> {
        self.values().clear().await?;
        if let Some(markers) = self.markers() {
            markers.clear().await?;
        }
        Ok(())
    }

    /// Adds a null marker for `key` and drops any real value it held.
    ///
    /// Returns the marker set's insertion flag, or true when null caching is off.
    async fn mark_null(&self, key: &str) -> Result<bool> {
        let Some(markers) = self.markers() else {
            return Ok(true);
        };

        let added = markers.add(key, NULL_MARKER_TTL).await?;
        let displaced = self.values().fast_remove(&[key.to_string()]).await?;
        if displaced > 0 {
            debug!(cache = %self.name, key, "Null write replaced a real value");
        }

        Ok(added)
    }

    async fn clear_null_marker(&self, key: &str) -> Result<()> {
        if let Some(markers) = self.markers() {
            if markers.remove(key).await? {
                debug!(cache = %self.name, key, "Cleared null marker on value write");
            }
        }
        Ok(())
    }
}

impl<C: StoreClient> fmt::Debug for NullAwareCache<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullAwareCache")
            .field("name", &self.name)
            .field("ttl_control", &self.ttl_control())
            .field("null_set_name", &self.null_set_name())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    type TestCache = NullAwareCache<MemoryStore<String>>;

    fn cache(ttl_control: bool, cache_nulls: bool) -> (MemoryStore<String>, TestCache) {
        let store = MemoryStore::new();
        let cache = NullAwareCache::new(&store, "users", ttl_control, cache_nulls);
        (store, cache)
    }

    fn v(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn key_set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_construction_derives_marker_set_name() {
        let (_, with_nulls) = cache(true, true);
        assert_eq!(with_nulls.name(), "users");
        assert_eq!(with_nulls.null_set_name(), Some("users_null_value_key_set"));
        assert!(with_nulls.ttl_control());
        assert!(with_nulls.cache_nulls());

        let (_, without_nulls) = cache(false, false);
        assert_eq!(without_nulls.null_set_name(), None);
        assert!(!without_nulls.ttl_control());
        assert!(!without_nulls.cache_nulls());
    }

    #[tokio::test]
    async fn test_unwritten_key_is_absent() {
        let (_, cache) = cache(true, true);

        assert!(!cache.contains_key("ghost").await.unwrap());
        assert_eq!(cache.get("ghost").await.unwrap(), CacheLookup::Absent);
    }

    #[tokio::test]
    async fn test_put_and_get_value() {
        let (_, cache) = cache(false, true);

        let returned = cache.put("k1", v("alice")).await.unwrap();

        assert_eq!(returned, v("alice"));
        assert_eq!(
            cache.get("k1").await.unwrap(),
            CacheLookup::Value("alice".to_string())
        );
        assert!(cache.contains_key("k1").await.unwrap());
    }

    #[tokio::test]
    async fn test_put_null_is_a_hit() {
        let (_, cache) = cache(false, true);

        assert_eq!(cache.put("k1", None).await.unwrap(), None);

        assert_eq!(cache.get("k1").await.unwrap(), CacheLookup::Null);
        assert!(cache.contains_key("k1").await.unwrap());
    }

    #[tokio::test]
    async fn test_put_null_without_null_caching_is_noop() {
        let (store, cache) = cache(false, false);

        cache.put("k1", None).await.unwrap();

        assert_eq!(cache.get("k1").await.unwrap(), CacheLookup::Absent);
        assert_eq!(store.stored_entries().await, 0);
    }

    #[tokio::test]
    async fn test_put_null_without_null_caching_keeps_prior_value() {
        let (_, cache) = cache(false, false);

        cache.put("k1", v("alice")).await.unwrap();
        cache.put("k1", None).await.unwrap();

        assert_eq!(
            cache.get("k1").await.unwrap(),
            CacheLookup::Value("alice".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_null_marker_expires_after_fixed_ttl() {
        let (_, cache) = cache(true, true);

        cache.put("k1", None).await.unwrap();

        tokio::time::advance(NULL_MARKER_TTL - Duration::from_millis(1)).await;
        assert_eq!(cache.get("k1").await.unwrap(), CacheLookup::Null);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(cache.get("k1").await.unwrap(), CacheLookup::Absent);
    }

    #[tokio::test(start_paused = true)]
    async fn test_null_marker_ignores_caller_ttl() {
        let (_, cache) = cache(true, true);

        cache
            .put_with_ttl("k1", None, Duration::from_secs(1))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(cache.get("k1").await.unwrap(), CacheLookup::Null);
    }

    #[tokio::test]
    async fn test_value_write_clears_null_marker() {
        // Regression: a real-value write must not leave a stale null marker behind
        let (store, cache) = cache(true, true);
        let markers = store.set_cache("users_null_value_key_set");

        cache.put("k1", None).await.unwrap();
        cache.put("k1", v("alice")).await.unwrap();

        assert!(!markers.contains("k1").await.unwrap());
        cache.remove("k1").await.unwrap();

        cache.put("k2", None).await.unwrap();
        cache
            .put_with_ttl("k2", v("bob"), Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!markers.contains("k2").await.unwrap());

        cache.put("k3", None).await.unwrap();
        cache.fast_put("k3", v("carol")).await.unwrap();
        assert!(!markers.contains("k3").await.unwrap());

        cache.put("k4", None).await.unwrap();
        cache
            .fast_put_with_ttl("k4", v("dave"), Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!markers.contains("k4").await.unwrap());
    }

    #[tokio::test]
    async fn test_null_write_displaces_value() {
        let (store, cache) = cache(false, true);
        let map = store.map("users");

        cache.put("k1", v("alice")).await.unwrap();
        cache.put("k1", None).await.unwrap();

        assert_eq!(map.get("k1").await.unwrap(), None);
        assert_eq!(cache.get("k1").await.unwrap(), CacheLookup::Null);
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_with_ttl_expires_value() {
        let (_, cache) = cache(true, false);

        cache
            .put_with_ttl("k1", v("alice"), Duration::from_millis(1500))
            .await
            .unwrap();
        assert!(cache.contains_key("k1").await.unwrap());

        tokio::time::advance(Duration::from_millis(1500)).await;
        assert_eq!(cache.get("k1").await.unwrap(), CacheLookup::Absent);
    }

    #[tokio::test]
    async fn test_put_with_ttl_rejected_without_ttl_control() {
        let (store, cache) = cache(false, true);

        cache.put("k1", v("old")).await.unwrap();
        let result = cache
            .put_with_ttl("k1", v("new"), Duration::from_millis(1000))
            .await;

        assert!(matches!(result, Err(CacheError::TtlNotSupported { .. })));
        assert_eq!(
            store.map("users").get("k1").await.unwrap(),
            Some("old".to_string())
        );

        let result = cache
            .fast_put_with_ttl("k2", v("new"), Duration::from_millis(1000))
            .await;
        assert!(matches!(result, Err(CacheError::TtlNotSupported { .. })));
        assert_eq!(cache.get("k2").await.unwrap(), CacheLookup::Absent);
    }

    #[tokio::test]
    async fn test_zero_ttl_falls_back_to_plain_put() {
        let (_, cache) = cache(false, false);

        cache
            .put_with_ttl("k1", v("alice"), Duration::ZERO)
            .await
            .unwrap();
        assert!(cache.fast_put_with_ttl("k2", v("bob"), Duration::ZERO).await.unwrap());

        assert!(cache.contains_key("k1").await.unwrap());
        assert!(cache.contains_key("k2").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sub_millisecond_ttl_is_plain_put() {
        let ttl = Duration::from_micros(500);

        let (_, plain) = cache(false, false);
        plain.put_with_ttl("k1", v("alice"), ttl).await.unwrap();
        assert!(plain.fast_put_with_ttl("k2", v("bob"), ttl).await.unwrap());
        plain
            .put_all_with_ttl(HashMap::from([("k3".to_string(), v("carol"))]), ttl)
            .await
            .unwrap();

        let (_, expiring) = cache(true, false);
        expiring.put_with_ttl("k1", v("alice"), ttl).await.unwrap();

        tokio::time::advance(Duration::from_secs(60)).await;
        for key in ["k1", "k2", "k3"] {
            assert!(plain.contains_key(key).await.unwrap(), "{key}");
        }
        assert_eq!(
            expiring.get("k1").await.unwrap(),
            CacheLookup::Value("alice".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_truncated_to_whole_millis() {
        let (_, cache) = cache(true, false);

        cache
            .put_with_ttl("k1", v("alice"), Duration::from_micros(2_900))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_micros(1_999)).await;
        assert!(cache.contains_key("k1").await.unwrap());
        tokio::time::advance(Duration::from_micros(1)).await;
        assert!(!cache.contains_key("k1").await.unwrap());
    }

    #[tokio::test]
    async fn test_null_with_ttl_allowed_without_ttl_control() {
        let (_, cache) = cache(false, true);

        cache
            .put_with_ttl("k1", None, Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(cache.get("k1").await.unwrap(), CacheLookup::Null);
    }

    #[tokio::test]
    async fn test_fast_put_reports_insertion() {
        let (_, cache) = cache(true, true);

        assert!(cache.fast_put("k1", v("a")).await.unwrap());
        assert!(!cache.fast_put("k1", v("b")).await.unwrap());

        assert!(cache.fast_put("n1", None).await.unwrap());
        assert!(!cache.fast_put("n1", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_fast_put_null_without_null_caching() {
        let (_, cache) = cache(false, false);

        assert!(cache.fast_put("n1", None).await.unwrap());
        assert_eq!(cache.get("n1").await.unwrap(), CacheLookup::Absent);
    }

    #[tokio::test]
    async fn test_remove_reports_previous_state() {
        let (_, cache) = cache(false, true);
        cache.put("value", v("alice")).await.unwrap();
        cache.put("null", None).await.unwrap();

        assert_eq!(
            cache.remove("value").await.unwrap(),
            CacheLookup::Value("alice".to_string())
        );
        assert_eq!(cache.remove("null").await.unwrap(), CacheLookup::Null);
        assert_eq!(cache.remove("ghost").await.unwrap(), CacheLookup::Absent);

        assert_eq!(cache.get("value").await.unwrap(), CacheLookup::Absent);
        assert_eq!(cache.get("null").await.unwrap(), CacheLookup::Absent);
    }

    #[tokio::test]
    async fn test_fast_remove_counts_only_real_values() {
        let (_, cache) = cache(false, true);
        cache.put("a", v("alice")).await.unwrap();
        cache.put("b", None).await.unwrap();

        let removed = cache
            .fast_remove(&["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert_eq!(cache.get("a").await.unwrap(), CacheLookup::Absent);
        assert_eq!(cache.get("b").await.unwrap(), CacheLookup::Absent);
        assert_eq!(cache.fast_remove(&[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_all_mixes_values_and_nulls() {
        let (_, cache) = cache(false, true);
        cache.put("a", v("valueA")).await.unwrap();
        cache.put("b", None).await.unwrap();

        let result = cache.get_all(&key_set(&["a", "b", "c"])).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result["a"], v("valueA"));
        assert_eq!(result["b"], None);
        assert!(!result.contains_key("c"));
    }

    #[tokio::test]
    async fn test_get_all_without_null_caching_omits_misses() {
        let (_, cache) = cache(false, false);
        cache.put("a", v("valueA")).await.unwrap();
        cache.put("b", None).await.unwrap();

        let result = cache.get_all(&key_set(&["a", "b"])).await.unwrap();

        assert_eq!(result, HashMap::from([("a".to_string(), v("valueA"))]));
    }

    #[tokio::test]
    async fn test_put_all_splits_values_and_nulls() {
        let (store, cache) = cache(true, true);
        cache.put("b", v("stale")).await.unwrap();
        cache.put("a", None).await.unwrap();

        cache
            .put_all(HashMap::from([
                ("a".to_string(), v("alice")),
                ("b".to_string(), None),
            ]))
            .await
            .unwrap();

        assert_eq!(
            cache.get("a").await.unwrap(),
            CacheLookup::Value("alice".to_string())
        );
        assert_eq!(cache.get("b").await.unwrap(), CacheLookup::Null);
        assert_eq!(store.map("users").get("b").await.unwrap(), None);
        assert!(!store
            .set_cache("users_null_value_key_set")
            .contains("a")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_put_all_with_ttl_validates_before_writing() {
        let (_, cache) = cache(false, true);

        let result = cache
            .put_all_with_ttl(
                HashMap::from([("a".to_string(), v("alice")), ("b".to_string(), None)]),
                Duration::from_secs(10),
            )
            .await;

        assert!(matches!(result, Err(CacheError::TtlNotSupported { .. })));
        assert_eq!(cache.get("a").await.unwrap(), CacheLookup::Absent);
        assert_eq!(cache.get("b").await.unwrap(), CacheLookup::Absent);
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_all_with_ttl_expires_values() {
        let (_, cache) = cache(true, true);

        cache
            .put_all_with_ttl(
                HashMap::from([("a".to_string(), v("alice")), ("b".to_string(), None)]),
                Duration::from_secs(10),
            )
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(cache.get("a").await.unwrap(), CacheLookup::Absent);
        assert_eq!(cache.get("b").await.unwrap(), CacheLookup::Null);
    }

    #[tokio::test]
    async fn test_clear_empties_both_structures() {
        let (store, cache) = cache(true, true);
        cache.put("a", v("alice")).await.unwrap();
        cache.put("b", None).await.unwrap();

        cache.clear().await.unwrap();

        assert!(!cache.contains_key("a").await.unwrap());
        assert!(!cache.contains_key("b").await.unwrap());
        assert_eq!(store.stored_entries().await, 0);
    }

    #[tokio::test]
    async fn test_caches_with_different_names_are_isolated() {
        let store = MemoryStore::<String>::new();
        let users = NullAwareCache::new(&store, "users", false, true);
        let orders = NullAwareCache::new(&store, "orders", false, true);

        users.put("k1", None).await.unwrap();

        assert_eq!(orders.get("k1").await.unwrap(), CacheLookup::Absent);
        orders.clear().await.unwrap();
        assert_eq!(users.get("k1").await.unwrap(), CacheLookup::Null);
    }
}
