use std::{future::Future, marker::PhantomData, time::Duration};

use tracing::{debug, info};

use crate::{
    error::{AppError, StoreError},
    models::{RecordId, Resource},
    store::SharedStore,
};

/// Single-document CRUD over one collection of the document store.
///
/// Every store call is bounded by `timeout`; expiry abandons the call and
/// reports [`StoreError::Timeout`]. Nothing is retried.
pub struct RecordService<T> {
    store: SharedStore,
    timeout: Duration,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for RecordService<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            timeout: self.timeout,
            _record: PhantomData,
        }
    }
}

impl<T: Resource> RecordService<T> {
    pub fn new(store: SharedStore, timeout: Duration) -> Self {
        Self {
            store,
            timeout,
            _record: PhantomData,
        }
    }

    async fn bounded<R>(
        &self,
        op: impl Future<Output = Result<R, StoreError>>,
    ) -> Result<R, StoreError> {
        tokio::time::timeout(self.timeout, op)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
    }

    /// Assigns a fresh identifier, whatever `record` carried, and inserts it.
    pub async fn create(&self, mut record: T) -> Result<T, AppError> {
        let id = RecordId::new();
        record.set_id(id);
        let document = encode(&record)?;
        self.bounded(self.store.insert(T::COLLECTION, id, document))
            .await?;
        info!(collection = T::COLLECTION, %id, "record created");
        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<T>, AppError> {
        let documents = self.bounded(self.store.find_all(T::COLLECTION)).await?;
        debug!(collection = T::COLLECTION, count = documents.len(), "records listed");
        documents
            .into_iter()
            .map(|document| decode(document).map_err(AppError::from))
            .collect()
    }

    pub async fn get(&self, id: RecordId) -> Result<T, AppError> {
        let document = self
            .bounded(self.store.find_one(T::COLLECTION, id))
            .await?
            .ok_or(StoreError::Missing {
                collection: T::COLLECTION,
                id,
            })?;
        Ok(decode(document)?)
    }

    /// Writes every field of `record` onto the stored document addressed by
    /// `id` and returns `record` with its id forced to `id`. The result is not
    /// re-read, and an id that matches nothing still succeeds.
    pub async fn update(&self, id: RecordId, mut record: T) -> Result<T, AppError> {
        record.set_id(id);
        let document = encode(&record)?;
        self.bounded(self.store.update(T::COLLECTION, id, document))
            .await?;
        info!(collection = T::COLLECTION, %id, "record updated");
        Ok(record)
    }

    /// Succeeds whether or not a document was removed.
    pub async fn delete(&self, id: RecordId) -> Result<(), AppError> {
        self.bounded(self.store.delete(T::COLLECTION, id)).await?;
        info!(collection = T::COLLECTION, %id, "record deleted");
        Ok(())
    }
}

fn encode<T: Resource>(record: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(record).map_err(StoreError::Encode)
}

fn decode<T: Resource>(document: serde_json::Value) -> Result<T, StoreError> {
    serde_json::from_value(document).map_err(StoreError::Decode)
}
