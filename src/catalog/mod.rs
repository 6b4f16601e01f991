//! Catalog module - the manager surface over the store.
//!
//! `StoreCatalog` talks straight to the store; `CachedCatalog` wraps it
//! with the cache-aside read layer. Both implement [`ContentCatalog`], so
//! call sites are agnostic about whether a cache is present. [`Catalog`]
//! picks between them from configuration.

mod cached;
mod keys;
mod manager;
mod search;

pub use cached::{CachePolicy, CachedCatalog};
pub use manager::StoreCatalog;
pub use search::SearchFilter;

use thiserror::Error;
use uuid::Uuid;

use crate::cache::CacheBackend;
use crate::config::Config;
use crate::model::{Content, ContentDraft, ContentPatch};
use crate::store::{ContentStore, StoreError};

/// Error from a catalog operation.
///
/// Absent ids are reported as `Ok(None)`, not as errors, and cache
/// failures never surface here at all: the cached manager degrades to
/// store-only behavior.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A tag mutation computed no effective change: nothing new to add, or
    /// nothing matched to remove. Distinct from the target being absent.
    #[error("tag set unchanged")]
    TagsUnchanged,

    /// The backing store failed; the operation did not take effect.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The read/write contract shared by the cached and uncached managers.
#[allow(async_fn_in_trait)]
pub trait ContentCatalog: Send + Sync {
    /// Fetch a single record.
    async fn get_one(&self, id: Uuid) -> Result<Option<Content>, CatalogError>;

    /// Fetch the full listing.
    async fn get_many(&self) -> Result<Vec<Content>, CatalogError>;

    /// Fetch the listing narrowed by `filter`.
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Content>, CatalogError>;

    /// Create a record from a draft; the id is assigned by the store.
    async fn create(&self, draft: ContentDraft) -> Result<Content, CatalogError>;

    /// Apply a partial update. Unset patch fields leave stored values
    /// unchanged.
    async fn update(&self, id: Uuid, patch: ContentPatch)
    -> Result<Option<Content>, CatalogError>;

    /// Delete a record, returning its id when it existed.
    async fn delete(&self, id: Uuid) -> Result<Option<Uuid>, CatalogError>;

    /// Add tags (case-insensitive union). Fails with
    /// [`CatalogError::TagsUnchanged`] when every tag is already present.
    async fn add_tags(&self, id: Uuid, tags: &[String]) -> Result<Option<Content>, CatalogError>;

    /// Remove tags (case-insensitive difference). Fails with
    /// [`CatalogError::TagsUnchanged`] when nothing matches.
    async fn remove_tags(&self, id: Uuid, tags: &[String])
    -> Result<Option<Content>, CatalogError>;
}

/// A catalog wired from configuration: cached when the cache flag is on,
/// store-only otherwise.
#[derive(Debug, Clone)]
pub enum Catalog<S, B> {
    Cached(CachedCatalog<S, B>),
    Direct(StoreCatalog<S>),
}

impl<S: ContentStore, B: CacheBackend> Catalog<S, B> {
    /// Build from configuration. The two variants honor the same contract;
    /// the only observable difference is read latency and staleness
    /// bounded by the configured TTLs.
    pub fn from_config(store: S, cache: B, config: &Config) -> Self {
        if config.cache_enabled {
            let policy = CachePolicy::default()
                .item_ttl(config.cache_item_ttl)
                .list_ttl(config.cache_list_ttl);
            Self::Cached(CachedCatalog::new(store, cache, policy))
        } else {
            Self::Direct(StoreCatalog::new(store))
        }
    }
}

impl<S: ContentStore, B: CacheBackend> ContentCatalog for Catalog<S, B> {
    async fn get_one(&self, id: Uuid) -> Result<Option<Content>, CatalogError> {
        match self {
            Self::Cached(catalog) => catalog.get_one(id).await,
            Self::Direct(catalog) => catalog.get_one(id).await,
        }
    }

    async fn get_many(&self) -> Result<Vec<Content>, CatalogError> {
        match self {
            Self::Cached(catalog) => catalog.get_many().await,
            Self::Direct(catalog) => catalog.get_many().await,
        }
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Content>, CatalogError> {
        match self {
            Self::Cached(catalog) => catalog.search(filter).await,
            Self::Direct(catalog) => catalog.search(filter).await,
        }
    }

    async fn create(&self, draft: ContentDraft) -> Result<Content, CatalogError> {
        match self {
            Self::Cached(catalog) => catalog.create(draft).await,
            Self::Direct(catalog) => catalog.create(draft).await,
        }
    }

    async fn update(
        &self,
        id: Uuid,
        patch: ContentPatch,
    ) -> Result<Option<Content>, CatalogError> {
        match self {
            Self::Cached(catalog) => catalog.update(id, patch).await,
            Self::Direct(catalog) => catalog.update(id, patch).await,
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Uuid>, CatalogError> {
        match self {
            Self::Cached(catalog) => catalog.delete(id).await,
            Self::Direct(catalog) => catalog.delete(id).await,
        }
    }

    async fn add_tags(&self, id: Uuid, tags: &[String]) -> Result<Option<Content>, CatalogError> {
        match self {
            Self::Cached(catalog) => catalog.add_tags(id, tags).await,
            Self::Direct(catalog) => catalog.add_tags(id, tags).await,
        }
    }

    async fn remove_tags(
        &self,
        id: Uuid,
        tags: &[String],
    ) -> Result<Option<Content>, CatalogError> {
        match self {
            Self::Cached(catalog) => catalog.remove_tags(id, tags).await,
            Self::Direct(catalog) => catalog.remove_tags(id, tags).await,
        }
    }
}
