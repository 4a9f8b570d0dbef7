pub mod device;

use axum::{routing::get, Json, Router};
use crate::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/device", device::router())
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
