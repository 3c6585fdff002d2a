//! Document persistence behind the record gateway.
//!
//! Backends see untyped JSON documents addressed by collection name and
//! [`RecordId`]; typing happens one layer up in
//! [`RecordService`](crate::services::records::RecordService).

pub mod memory;
#[cfg(feature = "mongodb")]
pub mod mongo;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{config::AppConfig, error::StoreError, models::RecordId};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type SharedStore = Arc<dyn DocumentStore>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, collection: &str, id: RecordId, document: Value)
        -> Result<(), StoreError>;

    /// Every document in the collection, in whatever order the backend keeps them.
    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    async fn find_one(&self, collection: &str, id: RecordId)
        -> Result<Option<Value>, StoreError>;

    /// Overwrites each top-level field of `document` on the stored record.
    /// Matching nothing is not an error.
    async fn update(&self, collection: &str, id: RecordId, document: Value)
        -> Result<(), StoreError>;

    /// Matching nothing is not an error.
    async fn delete(&self, collection: &str, id: RecordId) -> Result<(), StoreError>;
}

/// Opens the backend named by the scheme of `DATABASE_URL`.
pub async fn connect(config: &AppConfig) -> Result<SharedStore, StoreError> {
    let url = config.database_url.as_str();
    let scheme = url.split(':').next().unwrap_or_default();
    match scheme {
        "sqlite" => Ok(Arc::new(SqliteStore::connect(url).await?)),
        "memory" => Ok(Arc::new(MemoryStore::new())),
        #[cfg(feature = "mongodb")]
        "mongodb" | "mongodb+srv" => Ok(Arc::new(
            mongo::MongoStore::connect(url, &config.database_name, config.store_timeout).await?,
        )),
        #[cfg(not(feature = "mongodb"))]
        "mongodb" | "mongodb+srv" => Err(StoreError::Unsupported(format!(
            "{scheme} (build with the `mongodb` feature)"
        ))),
        other => Err(StoreError::Unsupported(other.to_string())),
    }
}

/// Top-level `$set` merge shared by the backends that patch JSON themselves.
pub(crate) fn merge_fields(target: &mut Value, fields: Value) {
    match (target.as_object_mut(), fields) {
        (Some(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                existing.insert(key, value);
            }
        }
        (_, fields) => *target = fields,
    }
}

#[cfg(test)]
mod tests {
    use std::{net::SocketAddr, time::Duration};

    use serde_json::json;

    use super::*;

    fn config(database_url: &str) -> AppConfig {
        AppConfig {
            database_url: database_url.into(),
            database_name: "mobile-app".into(),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            store_timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn merge_overwrites_declared_fields_and_keeps_the_rest() {
        let mut stored = json!({ "name": "old", "extra": 1 });
        merge_fields(&mut stored, json!({ "name": "new", "parking": true }));
        assert_eq!(stored, json!({ "name": "new", "extra": 1, "parking": true }));
    }

    #[tokio::test]
    async fn memory_scheme_opens_an_empty_store() {
        let store = connect(&config("memory:")).await.unwrap();
        assert!(store.find_all("hiking").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_schemes_are_rejected() {
        let result = connect(&config("postgres://localhost/db")).await;
        assert!(matches!(result, Err(StoreError::Unsupported(_))));
    }
}
