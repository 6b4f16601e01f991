//! MongoDB-backed content store.

use futures::StreamExt;
use mongodb::bson::{doc, to_document};
use mongodb::options::{ClientOptions, FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Client, Collection};
use tracing::{debug, info};
use uuid::Uuid;

use super::{ContentStore, StoreError};
use crate::model::{Content, ContentDraft, ContentPatch};

/// Database wrapper for MongoDB connections.
#[derive(Debug, Clone)]
pub struct Database {
    db: mongodb::Database,
}

impl Database {
    /// Connect to MongoDB with the given URI and database name.
    ///
    /// # Errors
    /// Returns error if connection fails.
    pub async fn connect(uri: &str, db_name: &str) -> anyhow::Result<Self> {
        let options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(options)?;

        // Ping before handing the database out
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("Successfully connected to MongoDB");

        Ok(Self {
            db: client.database(db_name),
        })
    }

    /// Get a typed collection from the database.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

/// Content store over a MongoDB collection.
///
/// Documents are keyed by the uuid in hyphenated string form (`_id`).
#[derive(Debug, Clone)]
pub struct MongoContentStore {
    collection: Collection<Content>,
}

impl MongoContentStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("contents"),
        }
    }
}

impl ContentStore for MongoContentStore {
    async fn create(&self, draft: ContentDraft) -> Result<Content, StoreError> {
        let content = Content::from_draft(Uuid::new_v4(), draft);
        self.collection.insert_one(&content).await?;
        debug!("created content {}", content.id);
        Ok(content)
    }

    async fn read(&self, id: Uuid) -> Result<Option<Content>, StoreError> {
        let found = self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await?;
        debug!("read content {}: found={}", id, found.is_some());
        Ok(found)
    }

    async fn read_all(&self) -> Result<Vec<Content>, StoreError> {
        let mut cursor = self.collection.find(doc! {}).await?;
        let mut contents = Vec::new();
        while let Some(result) = cursor.next().await {
            contents.push(result?);
        }
        Ok(contents)
    }

    async fn update(&self, id: Uuid, patch: ContentPatch) -> Result<Option<Content>, StoreError> {
        let set = to_document(&patch)?;
        if set.is_empty() {
            // Mongo rejects an empty $set; an all-unset patch is a no-op.
            return self.read(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id.to_string() }, doc! { "$set": set })
            .with_options(options)
            .await?;

        debug!("updated content {}: found={}", id, updated.is_some());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Uuid>, StoreError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_string() })
            .await?;
        debug!("deleted content {}: found={}", id, result.deleted_count > 0);
        Ok((result.deleted_count > 0).then_some(id))
    }
}
