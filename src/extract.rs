use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::{error::AppError, models::RecordId};

/// JSON request body. Any body that does not decode as `T` is a
/// validation error; the `Content-Type` header is not consulted.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        let value = serde_json::from_slice(&bytes)
            .map_err(|err| AppError::Validation(err.to_string()))?;
        Ok(Self(value))
    }
}

/// The `:id` path segment, parsed as a [`RecordId`].
#[derive(Debug, Clone, Copy)]
pub struct RecordPath(pub RecordId);

#[async_trait]
impl<S> FromRequestParts<S> for RecordPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        let id = raw
            .parse()
            .map_err(|err: bson::oid::Error| AppError::Validation(err.to_string()))?;
        Ok(Self(id))
    }
}
