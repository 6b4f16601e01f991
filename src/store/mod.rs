//! Store module - durable content persistence.
//!
//! The store is the single source of truth. Everything the cache layer
//! serves was read from here, and every write lands here before any cache
//! entry is touched.

mod memory;
mod mongo;

pub use memory::MemoryContentStore;
pub use mongo::{Database, MongoContentStore};

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::model::{Content, ContentDraft, ContentPatch};

/// Error from the backing store. Fatal to the operation it occurred in.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("document encoding error: {0}")]
    Encoding(#[from] mongodb::bson::ser::Error),

    /// The store could not be reached at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable id → record repository.
///
/// `update` applies a partial merge: unset patch fields leave the stored
/// value unchanged. Absent ids are reported as `Ok(None)`, never as
/// errors.
#[allow(async_fn_in_trait)]
pub trait ContentStore: Send + Sync {
    /// Persist a draft as a new record; the id is assigned here.
    async fn create(&self, draft: ContentDraft) -> Result<Content, StoreError>;

    /// Fetch a record by id.
    async fn read(&self, id: Uuid) -> Result<Option<Content>, StoreError>;

    /// Fetch every record.
    async fn read_all(&self) -> Result<Vec<Content>, StoreError>;

    /// Apply a partial update, returning the post-update record.
    async fn update(&self, id: Uuid, patch: ContentPatch) -> Result<Option<Content>, StoreError>;

    /// Delete a record, returning its id when it existed.
    async fn delete(&self, id: Uuid) -> Result<Option<Uuid>, StoreError>;
}

impl<S: ContentStore> ContentStore for Arc<S> {
    async fn create(&self, draft: ContentDraft) -> Result<Content, StoreError> {
        self.as_ref().create(draft).await
    }

    async fn read(&self, id: Uuid) -> Result<Option<Content>, StoreError> {
        self.as_ref().read(id).await
    }

    async fn read_all(&self) -> Result<Vec<Content>, StoreError> {
        self.as_ref().read_all().await
    }

    async fn update(&self, id: Uuid, patch: ContentPatch) -> Result<Option<Content>, StoreError> {
        self.as_ref().update(id, patch).await
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Uuid>, StoreError> {
        self.as_ref().delete(id).await
    }
}
