pub mod records;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    models::{Hiking, Observation},
    state::AppState,
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(records::router::<Hiking>())
        .merge(records::router::<Observation>())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
