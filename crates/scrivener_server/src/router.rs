//! Route table.

use crate::generate::generate;
use crate::generations::{create_generation, delete_generation, list_generations, update_bookmark};
use crate::state::AppState;
use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde_json::json;
use tracing::instrument;

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/generate", post(generate))
        .route(
            "/api/generations",
            get(list_generations).post(create_generation),
        )
        .route(
            "/api/generations/:id",
            patch(update_bookmark).delete(delete_generation),
        )
        .with_state(state)
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
