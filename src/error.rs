use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::models::RecordId;

/// Failures raised below the gateway, by a document store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[cfg(feature = "mongodb")]
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
    #[error("could not encode document: {0}")]
    Encode(serde_json::Error),
    #[error("could not decode stored document: {0}")]
    Decode(serde_json::Error),
    #[error("no document with id {id} in {collection}")]
    Missing { collection: &'static str, id: RecordId },
    #[error("document {id} already exists in {collection}")]
    Conflict { collection: String, id: RecordId },
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("unsupported store url: {0}")]
    Unsupported(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Io(_) | AppError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            error!(error = %message, "request failed");
        } else {
            debug!(error = %message, %status, "request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
