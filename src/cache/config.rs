//! Cache backend configuration.

/// Configuration for an in-process cache backend.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries held before eviction.
    pub max_capacity: u64,

    /// Whether reads reset an entry's expiration clock (sliding
    /// expiration). When off, entries expire a fixed TTL after insert.
    pub sliding: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            sliding: true,
        }
    }
}

impl CacheConfig {
    /// Create a new cache config with the given max capacity.
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            max_capacity,
            ..Default::default()
        }
    }

    /// Set max capacity (builder pattern).
    #[must_use]
    pub fn max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Fixed expiration: entries expire their TTL after insert regardless
    /// of reads.
    #[must_use]
    pub fn fixed_expiry(mut self) -> Self {
        self.sliding = false;
        self
    }
}
