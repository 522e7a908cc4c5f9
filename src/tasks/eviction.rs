//! Eviction Task
//!
//! Background task that periodically purges expired entries from the in-memory store.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::MemoryStore;

/// Spawns a background task that periodically purges expired entries.
///
/// Expired values and null markers are already invisible to reads; this task
/// reclaims their memory. It sleeps for `interval_secs` between runs.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let store = MemoryStore::<String>::new();
/// let eviction_handle = spawn_eviction_task(store.clone(), 1);
/// // Later, during shutdown:
/// eviction_handle.abort();
/// ```
pub fn spawn_eviction_task<V>(store: MemoryStore<V>, interval_secs: u64) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting eviction task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.purge_expired().await;

            if removed > 0 {
                info!("Eviction: removed {} expired entries", removed);
            } else {
                debug!("Eviction: no expired entries found");
            }
        }
    })
}
