//! Uncached manager: straight pass-through to the store.

use tracing::debug;
use uuid::Uuid;

use super::{CatalogError, ContentCatalog, SearchFilter};
use crate::model::{Content, ContentDraft, ContentPatch};
use crate::store::ContentStore;

/// Manager that talks directly to the backing store.
///
/// Carries the tag-set computation and search filtering; the cached
/// manager wraps this type and inherits both.
#[derive(Debug, Clone)]
pub struct StoreCatalog<S> {
    store: S,
}

impl<S: ContentStore> StoreCatalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: ContentStore> ContentCatalog for StoreCatalog<S> {
    async fn get_one(&self, id: Uuid) -> Result<Option<Content>, CatalogError> {
        Ok(self.store.read(id).await?)
    }

    async fn get_many(&self) -> Result<Vec<Content>, CatalogError> {
        Ok(self.store.read_all().await?)
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Content>, CatalogError> {
        // Filtering happens over the full listing; the store is never
        // asked to understand the matching rule.
        let mut contents = self.store.read_all().await?;
        contents.retain(|content| filter.matches(content));
        Ok(contents)
    }

    async fn create(&self, draft: ContentDraft) -> Result<Content, CatalogError> {
        Ok(self.store.create(draft).await?)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: ContentPatch,
    ) -> Result<Option<Content>, CatalogError> {
        Ok(self.store.update(id, patch).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Uuid>, CatalogError> {
        Ok(self.store.delete(id).await?)
    }

    async fn add_tags(&self, id: Uuid, tags: &[String]) -> Result<Option<Content>, CatalogError> {
        // The current tag set comes from the store, never a cache: acting
        // on a stale set would silently drop a concurrent writer's tags.
        let Some(current) = self.store.read(id).await? else {
            return Ok(None);
        };
        let Some(merged) = current.merge_tags(tags) else {
            debug!("no new tags to add to content {id}");
            return Err(CatalogError::TagsUnchanged);
        };
        Ok(self.store.update(id, ContentPatch::tags(merged)).await?)
    }

    async fn remove_tags(
        &self,
        id: Uuid,
        tags: &[String],
    ) -> Result<Option<Content>, CatalogError> {
        let Some(current) = self.store.read(id).await? else {
            return Ok(None);
        };
        let Some(remaining) = current.without_tags(tags) else {
            debug!("no matching tags to remove from content {id}");
            return Err(CatalogError::TagsUnchanged);
        };
        Ok(self.store.update(id, ContentPatch::tags(remaining)).await?)
    }
}
