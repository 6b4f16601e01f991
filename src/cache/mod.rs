//! Cache module - key/value caching with per-entry TTL.
//!
//! The cache is an optimization layered in front of the store, never a
//! source of truth. The manager in [`crate::catalog`] decides what goes in
//! under which key and when entries must be invalidated; this module only
//! provides the backend contract and the in-process implementation.
//!
//! ## Architecture
//!
//! - `CacheBackend` - the backend contract: string keys, opaque byte
//!   values, a TTL per insert, prefix invalidation
//! - `MemoryBackend` - Moka-backed in-process implementation
//! - `CacheConfig` - capacity and expiry-mode configuration
//!
//! Backends are plain values handed to their consumers at construction;
//! there is no process-wide cache handle.

mod backend;
mod config;
mod memory;

pub use backend::{CacheBackend, CacheError};
pub use config::CacheConfig;
pub use memory::MemoryBackend;
