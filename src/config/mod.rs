//! Configuration module.
//!
//! Loads configuration from environment variables.

use std::env;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // MongoDB
    pub mongodb_uri: String,
    pub mongodb_database: String,

    /// Whether reads go through the cache layer at all.
    pub cache_enabled: bool,

    /// TTL for single-record cache entries.
    pub cache_item_ttl: Duration,

    /// TTL for listing cache entries. Listings change on every write;
    /// keep this at or below the item TTL.
    pub cache_list_ttl: Duration,

    /// Maximum number of cache entries held before eviction.
    pub cache_max_capacity: u64,

    /// Whether cache reads reset an entry's expiration clock.
    pub cache_sliding_expiry: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if required environment variables are not set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            mongodb_uri: env::var("MONGODB_URI").expect("MONGODB_URI must be set"),
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "lineup".to_string()),
            cache_enabled: env_bool("CACHE_ENABLED", true),
            cache_item_ttl: Duration::from_secs(env_u64("CACHE_ITEM_TTL_SECS", 60)),
            cache_list_ttl: Duration::from_secs(env_u64("CACHE_LIST_TTL_SECS", 60)),
            cache_max_capacity: env_u64("CACHE_MAX_CAPACITY", 10_000),
            cache_sliding_expiry: env_bool("CACHE_SLIDING_EXPIRY", true),
        }
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_bool(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(v) => matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
