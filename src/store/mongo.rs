use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson, Document},
    options::ClientOptions,
    Client, Database,
};
use serde_json::Value;
use tracing::info;

use super::DocumentStore;
use crate::{error::StoreError, models::RecordId};

/// MongoDB backend; `_id` is kept as a native ObjectId.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    pub async fn connect(
        url: &str,
        database: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let mut options = tokio::time::timeout(timeout, ClientOptions::parse(url))
            .await
            .map_err(|_| StoreError::Timeout(timeout))??;
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        let client = Client::with_options(options)?;
        info!(database, "using mongodb document store");
        Ok(Self {
            database: client.database(database),
        })
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.database.collection(name)
    }
}

fn to_document(id: RecordId, document: Value) -> Result<Document, StoreError> {
    let mut converted = bson::to_document(&document).map_err(mongodb::error::Error::from)?;
    converted.insert("_id", id.object_id());
    Ok(converted)
}

fn to_value(mut document: Document) -> Value {
    let id = document.remove("_id");
    let mut value = Bson::Document(document).into_relaxed_extjson();
    if let (Some(Bson::ObjectId(oid)), Some(fields)) = (id, value.as_object_mut()) {
        fields.insert("_id".into(), Value::String(oid.to_hex()));
    }
    value
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(
        &self,
        collection: &str,
        id: RecordId,
        document: Value,
    ) -> Result<(), StoreError> {
        self.collection(collection)
            .insert_one(to_document(id, document)?, None)
            .await?;
        Ok(())
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let cursor = self.collection(collection).find(doc! {}, None).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(to_value).collect())
    }

    async fn find_one(
        &self,
        collection: &str,
        id: RecordId,
    ) -> Result<Option<Value>, StoreError> {
        let found = self
            .collection(collection)
            .find_one(doc! { "_id": id.object_id() }, None)
            .await?;
        Ok(found.map(to_value))
    }

    async fn update(
        &self,
        collection: &str,
        id: RecordId,
        document: Value,
    ) -> Result<(), StoreError> {
        let mut fields = to_document(id, document)?;
        fields.remove("_id");
        self.collection(collection)
            .update_one(doc! { "_id": id.object_id() }, doc! { "$set": fields }, None)
            .await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: RecordId) -> Result<(), StoreError> {
        self.collection(collection)
            .delete_one(doc! { "_id": id.object_id() }, None)
            .await?;
        Ok(())
    }
}
