//! Stored Entry Module
//!
//! Defines a single entry held by the in-memory backend, with an optional deadline.

use std::time::Duration;

use tokio::time::Instant;

// == Stored Entry ==
/// A value held by the in-memory backend together with its expiration metadata.
///
/// Set members are stored as `StoredEntry<()>`.
#[derive(Debug, Clone)]
pub struct StoredEntry<T> {
    /// The stored payload
    pub value: T,
    /// Deadline after which the entry is invisible, None = no expiration
    pub expires_at: Option<Instant>,
}

impl<T> StoredEntry<T> {
    // == Constructor ==
    /// Creates a new entry with an optional time-to-live.
    ///
    /// A zero TTL is treated as "no expiration".
    pub fn new(value: T, ttl: Option<Duration>) -> Self {
        let expires_at = ttl
            .filter(|ttl| !ttl.is_zero())
            .map(|ttl| Instant::now() + ttl);

        Self {
            value,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its deadline, so a fully elapsed TTL is never readable.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    /// Returns true while the entry is still readable.
    pub fn is_live(&self) -> bool {
        !self.is_expired()
    }
}
