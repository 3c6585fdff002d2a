use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{merge_fields, DocumentStore};
use crate::{error::StoreError, models::RecordId};

type Collection = BTreeMap<RecordId, Value>;

/// Process-local store, lost on restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(
        &self,
        collection: &str,
        id: RecordId,
        document: Value,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(&id) {
            return Err(StoreError::Conflict {
                collection: collection.to_string(),
                id,
            });
        }
        docs.insert(id, document);
        Ok(())
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        id: RecordId,
    ) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(&id))
            .cloned())
    }

    async fn update(
        &self,
        collection: &str,
        id: RecordId,
        document: Value,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        if let Some(stored) = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(&id))
        {
            merge_fields(stored, document);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: RecordId) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(&id);
        }
        Ok(())
    }
}
