//! Cache-aside manager.
//!
//! Wraps the uncached manager behind the same contract. Reads are served
//! from the cache when possible and repopulated from the store on miss;
//! writes go through to the store first and invalidate afterwards, so a
//! reader never observes a value older than the last completed
//! invalidation. Anything an invalidation cannot reach is bounded by the
//! entry's TTL.
//!
//! The store write is the one required success: invalidation failures are
//! logged but never fail the operation, and every cache failure degrades
//! the call to store-only behavior.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use super::keys;
use super::{CatalogError, ContentCatalog, SearchFilter, StoreCatalog};
use crate::cache::CacheBackend;
use crate::model::{Content, ContentDraft, ContentPatch};
use crate::store::ContentStore;

/// TTL policy for cached values.
///
/// Listings are invalidated wholesale on every write, so their TTL only
/// bounds staleness for writers that never reached the cache; keep it at
/// or below the item TTL.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    pub item_ttl: Duration,
    pub list_ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            item_ttl: Duration::from_secs(60),
            list_ttl: Duration::from_secs(60),
        }
    }
}

impl CachePolicy {
    /// Set the TTL for single-record entries.
    #[must_use]
    pub fn item_ttl(mut self, ttl: Duration) -> Self {
        self.item_ttl = ttl;
        self
    }

    /// Set the TTL for listing entries.
    #[must_use]
    pub fn list_ttl(mut self, ttl: Duration) -> Self {
        self.list_ttl = ttl;
        self
    }
}

/// Cache-aside manager over a store.
#[derive(Debug, Clone)]
pub struct CachedCatalog<S, B> {
    inner: StoreCatalog<S>,
    cache: B,
    policy: CachePolicy,
}

impl<S: ContentStore, B: CacheBackend> CachedCatalog<S, B> {
    pub fn new(store: S, cache: B, policy: CachePolicy) -> Self {
        Self {
            inner: StoreCatalog::new(store),
            cache,
            policy,
        }
    }

    /// Look up and decode a cached value. Backend failures count as
    /// misses; entries that no longer decode are dropped.
    fn cache_get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.cache.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(err) => {
                warn!("cache read for {key} failed, falling through to store: {err}");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                debug!("{key} served from cache");
                Some(value)
            }
            Err(err) => {
                warn!("dropping cache entry {key} that no longer decodes: {err}");
                self.remove_key(key);
                None
            }
        }
    }

    fn cache_put<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("not caching {key}: {err}");
                return;
            }
        };
        if let Err(err) = self.cache.set(key, &bytes, ttl) {
            warn!("cache write for {key} failed: {err}");
        }
    }

    fn remove_key(&self, key: &str) {
        if let Err(err) = self.cache.remove(key) {
            warn!("invalidation of {key} failed, stale reads possible until TTL: {err}");
        }
    }

    /// Invalidate everything a write to `id` could have made stale: the
    /// item entry, the full listing, and every search listing (search
    /// entries cannot be selectively matched to the changed record, so
    /// they go wholesale).
    ///
    /// Must only run after the store write is acknowledged; a reader
    /// racing the write repopulates from the post-write store state.
    fn invalidate_write(&self, id: Uuid) {
        self.remove_key(&keys::item_key(id));
        self.remove_key(keys::LIST_ALL);
        if let Err(err) = self.cache.remove_prefix(keys::SEARCH_PREFIX) {
            warn!("search invalidation failed, stale listings possible until TTL: {err}");
        }
    }
}

impl<S: ContentStore, B: CacheBackend> ContentCatalog for CachedCatalog<S, B> {
    async fn get_one(&self, id: Uuid) -> Result<Option<Content>, CatalogError> {
        let key = keys::item_key(id);
        if let Some(content) = self.cache_get::<Content>(&key) {
            return Ok(Some(content));
        }

        let found = self.inner.get_one(id).await?;
        if let Some(content) = &found {
            self.cache_put(&key, content, self.policy.item_ttl);
        }
        // Absence is never cached: a miss must not mask a later create.
        Ok(found)
    }

    async fn get_many(&self) -> Result<Vec<Content>, CatalogError> {
        if let Some(contents) = self.cache_get::<Vec<Content>>(keys::LIST_ALL) {
            return Ok(contents);
        }

        let contents = self.inner.get_many().await?;
        self.cache_put(keys::LIST_ALL, &contents, self.policy.list_ttl);
        Ok(contents)
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Content>, CatalogError> {
        let key = keys::search_key(filter);
        if let Some(contents) = self.cache_get::<Vec<Content>>(&key) {
            return Ok(contents);
        }

        let contents = self.inner.search(filter).await?;
        self.cache_put(&key, &contents, self.policy.list_ttl);
        Ok(contents)
    }

    async fn create(&self, draft: ContentDraft) -> Result<Content, CatalogError> {
        let created = self.inner.create(draft).await?;
        // A fresh v4 id cannot have a live item entry, but id generation
        // is the store's property, not this layer's.
        self.invalidate_write(created.id);
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: ContentPatch,
    ) -> Result<Option<Content>, CatalogError> {
        let updated = self.inner.update(id, patch).await?;
        if updated.is_some() {
            self.invalidate_write(id);
        }
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Uuid>, CatalogError> {
        let deleted = self.inner.delete(id).await?;
        if deleted.is_some() {
            self.invalidate_write(id);
        }
        Ok(deleted)
    }

    async fn add_tags(&self, id: Uuid, tags: &[String]) -> Result<Option<Content>, CatalogError> {
        let updated = self.inner.add_tags(id, tags).await?;
        if updated.is_some() {
            self.invalidate_write(id);
        }
        Ok(updated)
    }

    async fn remove_tags(
        &self,
        id: Uuid,
        tags: &[String],
    ) -> Result<Option<Content>, CatalogError> {
        let updated = self.inner.remove_tags(id, tags).await?;
        if updated.is_some() {
            self.invalidate_write(id);
        }
        Ok(updated)
    }
}
