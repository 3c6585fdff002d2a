use async_trait::async_trait;
use serde_json::Value;

use super::DocumentStore;
use crate::{
    db::{self, DbPool},
    error::StoreError,
    models::RecordId,
};

/// Documents kept as JSON text in a single SQLite table keyed by
/// `(collection, id)`.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Opens the database file, creating it if needed, and applies migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = db::init_pool(database_url).await?;
        db::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }
}

fn encode(document: &Value) -> Result<String, StoreError> {
    serde_json::to_string(document).map_err(StoreError::Encode)
}

fn decode(raw: &str) -> Result<Value, StoreError> {
    serde_json::from_str(raw).map_err(StoreError::Decode)
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn insert(
        &self,
        collection: &str,
        id: RecordId,
        document: Value,
    ) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
            .bind(collection)
            .bind(id.to_hex())
            .bind(encode(&document)?)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let rows: Vec<String> =
            sqlx::query_scalar("SELECT body FROM documents WHERE collection = ? ORDER BY rowid")
                .bind(collection)
                .fetch_all(&self.pool)
                .await?;
        rows.iter().map(|raw| decode(raw)).collect()
    }

    async fn find_one(
        &self,
        collection: &str,
        id: RecordId,
    ) -> Result<Option<Value>, StoreError> {
        let row: Option<String> =
            sqlx::query_scalar("SELECT body FROM documents WHERE collection = ? AND id = ?")
                .bind(collection)
                .bind(id.to_hex())
                .fetch_optional(&self.pool)
                .await?;
        row.as_deref().map(decode).transpose()
    }

    async fn update(
        &self,
        collection: &str,
        id: RecordId,
        document: Value,
    ) -> Result<(), StoreError> {
        // json_patch drops keys whose value is null; typed records never encode null.
        sqlx::query(
            "UPDATE documents SET body = json_patch(body, ?) WHERE collection = ? AND id = ?",
        )
        .bind(encode(&document)?)
        .bind(collection)
        .bind(id.to_hex())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: RecordId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id.to_hex())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
