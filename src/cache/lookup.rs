//! Cache Lookup Module
//!
//! Result of a single-key read, keeping "cached as null" apart from "not cached".

// == Cache Lookup ==
/// Outcome of reading one key through the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup<V> {
    /// The key holds a real value
    Value(V),
    /// The key is known to have a null source value (a cache hit)
    Null,
    /// The key is not cached (a cache miss)
    Absent,
}

impl<V> CacheLookup<V> {
    /// Returns true for any hit, real or null.
    pub fn is_present(&self) -> bool {
        !matches!(self, CacheLookup::Absent)
    }

    /// Returns true when the key is cached as null.
    pub fn is_null(&self) -> bool {
        matches!(self, CacheLookup::Null)
    }

    /// Consumes the lookup and returns the real value, if any.
    pub fn into_value(self) -> Option<V> {
        match self {
            CacheLookup::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// Reads the nested-option form used by batch reads: `Some(Some(v))` for a
/// value, `Some(None)` for a cached null, `None` for a miss.
impl<V> From<Option<Option<V>>> for CacheLookup<V> {
    fn from(entry: Option<Option<V>>) -> Self {
        match entry {
            Some(Some(value)) => CacheLookup::Value(value),
            Some(None) => CacheLookup::Null,
            None => CacheLookup::Absent,
        }
    }
}
