use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::ports::StateReader;

use super::handlers::{disks_handler, health_handler, state_handler, AppState};

pub fn create_router(reader: StateReader) -> Router {
    let state = AppState { reader };

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/state", get(state_handler))
        .route("/api/disks", get(disks_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
