//! Null Cache - A null-aware caching facade over a key-value store
//!
//! Distinguishes "not cached" from "cached as null", with optional per-entry TTL
//! and independently expiring null markers.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheLookup, NullAwareCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use store::{MemoryStore, StoreClient, StoreError};
pub use tasks::spawn_eviction_task;
