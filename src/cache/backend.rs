//! Cache backend contract.

use std::time::Duration;

use thiserror::Error;

/// Error from a cache backend.
///
/// Never fatal to a catalog operation: the manager logs the failure and
/// falls through to the store.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backend could not serve the call (timeout, connection loss,
    /// internal failure).
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
}

/// A key/value store with per-entry TTL.
///
/// Values are opaque bytes; whatever encoding the caller uses must
/// round-trip exactly. Implementations provide atomic per-key
/// get/set/remove but no cross-key transactions. Entries are only ever
/// replaced or removed, never mutated in place.
pub trait CacheBackend: Send + Sync {
    /// Look up a key. `Ok(None)` is a miss.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Insert or replace a key with the given time-to-live.
    fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;

    /// Remove a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), CacheError>;

    /// Remove every key starting with `prefix`.
    fn remove_prefix(&self, prefix: &str) -> Result<(), CacheError>;
}
