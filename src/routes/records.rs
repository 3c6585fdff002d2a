use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    extract::{JsonBody, RecordPath},
    models::Resource,
    state::AppState,
};

/// The five record endpoints, at `/{collection}` and `/{collection}/:id`.
pub fn router<T: Resource>() -> Router<AppState> {
    let base = format!("/{}", T::COLLECTION);
    Router::new()
        .route(&base, get(list::<T>).post(create::<T>))
        .route(
            &format!("{base}/:id"),
            get(show::<T>).patch(update::<T>).delete(remove::<T>),
        )
}

async fn list<T: Resource>(State(state): State<AppState>) -> Result<Json<Vec<T>>, AppError> {
    Ok(Json(state.records::<T>().list().await?))
}

async fn show<T: Resource>(
    State(state): State<AppState>,
    RecordPath(id): RecordPath,
) -> Result<Json<T>, AppError> {
    Ok(Json(state.records::<T>().get(id).await?))
}

async fn create<T: Resource>(
    State(state): State<AppState>,
    JsonBody(record): JsonBody<T>,
) -> Result<Json<T>, AppError> {
    Ok(Json(state.records::<T>().create(record).await?))
}

async fn update<T: Resource>(
    State(state): State<AppState>,
    RecordPath(id): RecordPath,
    JsonBody(record): JsonBody<T>,
) -> Result<Json<T>, AppError> {
    Ok(Json(state.records::<T>().update(id, record).await?))
}

async fn remove<T: Resource>(
    State(state): State<AppState>,
    RecordPath(id): RecordPath,
) -> Result<Json<Value>, AppError> {
    state.records::<T>().delete(id).await?;
    Ok(Json(json!({ "message": format!("{} deleted", T::LABEL) })))
}
