//! In-process cache backend over Moka.

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::sync::Cache;

use super::{CacheBackend, CacheConfig, CacheError};

/// One cached value and the TTL it was inserted with.
#[derive(Clone)]
struct CacheEntry {
    bytes: Arc<[u8]>,
    ttl: Duration,
}

/// Expiry policy honoring each entry's own TTL.
struct PerEntryTtl {
    sliding: bool,
}

impl Expiry<String, CacheEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_read(
        &self,
        _key: &String,
        entry: &CacheEntry,
        _read_at: Instant,
        duration_until_expiry: Option<Duration>,
        _last_modified_at: Instant,
    ) -> Option<Duration> {
        if self.sliding {
            Some(entry.ttl)
        } else {
            duration_until_expiry
        }
    }
}

/// Thread-safe in-process backend.
///
/// Cloning is cheap and shares the underlying cache.
#[derive(Clone)]
pub struct MemoryBackend {
    inner: Cache<String, CacheEntry>,
}

impl MemoryBackend {
    /// Create a backend with the given capacity and expiry mode.
    pub fn new(config: CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl {
                sliding: config.sliding,
            })
            .support_invalidation_closures()
            .build();
        Self { inner }
    }

    /// Number of live entries. May lag behind recent operations.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}

impl CacheBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.inner.get(key).map(|entry| entry.bytes.to_vec()))
    }

    fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        self.inner.insert(
            key.to_owned(),
            CacheEntry {
                bytes: Arc::from(value),
                ttl,
            },
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.inner.invalidate(key);
        Ok(())
    }

    fn remove_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        let prefix = prefix.to_owned();
        self.inner
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
            .map_err(|err| CacheError::Unavailable(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[test]
    fn set_get_round_trip() {
        let backend = MemoryBackend::default();
        backend.set("item:1", b"payload", TTL).unwrap();

        assert_eq!(backend.get("item:1").unwrap(), Some(b"payload".to_vec()));
        assert_eq!(backend.get("item:2").unwrap(), None);
    }

    #[test]
    fn set_replaces_existing_value() {
        let backend = MemoryBackend::default();
        backend.set("item:1", b"old", TTL).unwrap();
        backend.set("item:1", b"new", TTL).unwrap();

        assert_eq!(backend.get("item:1").unwrap(), Some(b"new".to_vec()));
    }

    #[test]
    fn remove_is_idempotent() {
        let backend = MemoryBackend::default();
        backend.set("item:1", b"payload", TTL).unwrap();

        backend.remove("item:1").unwrap();
        assert_eq!(backend.get("item:1").unwrap(), None);

        // Absent key: still a no-op, never an error.
        backend.remove("item:1").unwrap();
        backend.remove("never-existed").unwrap();
    }

    #[test]
    fn remove_prefix_spares_other_keys() {
        let backend = MemoryBackend::default();
        backend.set("list:search:a:", b"a", TTL).unwrap();
        backend.set("list:search:b:", b"b", TTL).unwrap();
        backend.set("list:all", b"all", TTL).unwrap();

        backend.remove_prefix("list:search:").unwrap();

        assert_eq!(backend.get("list:search:a:").unwrap(), None);
        assert_eq!(backend.get("list:search:b:").unwrap(), None);
        assert_eq!(backend.get("list:all").unwrap(), Some(b"all".to_vec()));
    }

    #[test]
    fn entries_expire_after_their_own_ttl() {
        let backend = MemoryBackend::new(CacheConfig::default().fixed_expiry());
        backend.set("short", b"x", Duration::from_millis(50)).unwrap();
        backend.set("long", b"y", TTL).unwrap();

        std::thread::sleep(Duration::from_millis(200));

        assert_eq!(backend.get("short").unwrap(), None);
        assert_eq!(backend.get("long").unwrap(), Some(b"y".to_vec()));
    }
}
