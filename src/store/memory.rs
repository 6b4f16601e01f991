//! In-memory content store.
//!
//! Same contract as the Mongo store, over a concurrent map. Backs the test
//! suite and cache-free embeddings that don't need durability.

use dashmap::DashMap;
use uuid::Uuid;

use super::{ContentStore, StoreError};
use crate::model::{Content, ContentDraft, ContentPatch};

/// Concurrent in-process store.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    contents: DashMap<Uuid, Content>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

impl ContentStore for MemoryContentStore {
    async fn create(&self, draft: ContentDraft) -> Result<Content, StoreError> {
        let content = Content::from_draft(Uuid::new_v4(), draft);
        self.contents.insert(content.id, content.clone());
        Ok(content)
    }

    async fn read(&self, id: Uuid) -> Result<Option<Content>, StoreError> {
        Ok(self.contents.get(&id).map(|entry| entry.value().clone()))
    }

    async fn read_all(&self) -> Result<Vec<Content>, StoreError> {
        Ok(self.contents.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn update(&self, id: Uuid, patch: ContentPatch) -> Result<Option<Content>, StoreError> {
        match self.contents.get_mut(&id) {
            Some(mut entry) => {
                patch.apply_to(entry.value_mut());
                Ok(Some(entry.value().clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Uuid>, StoreError> {
        Ok(self.contents.remove(&id).map(|(id, _)| id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> ContentDraft {
        ContentDraft {
            title: title.to_string(),
            tags: vec!["Action".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_then_read_back() {
        let store = MemoryContentStore::new();
        let created = store.create(draft("Nerd Quest")).await.unwrap();

        let found = store.read(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn read_missing_is_none() {
        let store = MemoryContentStore::new();
        assert!(store.read(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_merges_partially() {
        let store = MemoryContentStore::new();
        let created = store.create(draft("Nerd Quest")).await.unwrap();

        let patch = ContentPatch {
            subtitle: Some("Season 2".to_string()),
            ..Default::default()
        };
        let updated = store.update(created.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.subtitle, "Season 2");
        assert_eq!(updated.title, "Nerd Quest");
        assert_eq!(updated.tags, created.tags);
    }

    #[tokio::test]
    async fn update_missing_is_none() {
        let store = MemoryContentStore::new();
        let patch = ContentPatch::tags(vec!["Drama".to_string()]);
        assert!(store.update(Uuid::new_v4(), patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_patch_returns_current_record() {
        let store = MemoryContentStore::new();
        let created = store.create(draft("Nerd Quest")).await.unwrap();

        let updated = store
            .update(created.id, ContentPatch::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn delete_returns_id_once() {
        let store = MemoryContentStore::new();
        let created = store.create(draft("Nerd Quest")).await.unwrap();

        assert_eq!(store.delete(created.id).await.unwrap(), Some(created.id));
        assert_eq!(store.delete(created.id).await.unwrap(), None);
        assert!(store.is_empty());
    }
}
