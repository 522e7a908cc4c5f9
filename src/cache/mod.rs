//! Cache Module
//!
//! Null-aware caching facade over a pluggable key-value store.

mod lookup;
mod null_aware;


// Re-export public types
pub use lookup::CacheLookup;
pub use null_aware::{NullAwareCache, NULL_MARKER_TTL, NULL_SET_SUFFIX};
