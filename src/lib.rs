//! Lineup - content catalog with a cache-aside read layer.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `model` - The `Content` record and its input shapes
//! - `store` - Source-of-truth persistence (MongoDB, in-memory)
//! - `cache` - Key/value cache backend with per-entry TTL (Moka)
//! - `catalog` - The manager surface; `CachedCatalog` layers cache-aside
//!   reads and write-then-invalidate over `StoreCatalog`
//!
//! Writes land in the store first and invalidate afterwards, so a reader
//! never observes a value older than the last completed invalidation;
//! anything an invalidation cannot reach is bounded by the entry TTL. The
//! cache is an optimization, never a source of truth: every cache failure
//! degrades the call to store-only behavior.
//!
//! ## Usage
//!
//! ```no_run
//! use lineup::cache::{CacheConfig, MemoryBackend};
//! use lineup::catalog::{Catalog, ContentCatalog};
//! use lineup::config::Config;
//! use lineup::store::{Database, MongoContentStore};
//!
//! # async fn wire() -> anyhow::Result<()> {
//! let config = Config::from_env();
//! let db = Database::connect(&config.mongodb_uri, &config.mongodb_database).await?;
//! let store = MongoContentStore::new(&db);
//! let cache = MemoryBackend::new(
//!     CacheConfig::default().max_capacity(config.cache_max_capacity),
//! );
//!
//! // Cached or store-only, depending on configuration; same contract
//! // either way.
//! let catalog = Catalog::from_config(store, cache, &config);
//! let _listing = catalog.get_many().await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod model;
pub mod store;
