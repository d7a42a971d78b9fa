//! `/api/generations`: persisted generation records.
//!
//! Store failures are logged with detail and answered with a generic JSON
//! error. Malformed bodies and ids are treated the same way.

use crate::state::AppState;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scrivener_core::{BookmarkUpdate, NewGeneration};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// Query string for listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    bookmarked: Option<String>,
}

impl ListParams {
    /// Only the literal `true` activates the filter.
    fn bookmarked_only(&self) -> bool {
        self.bookmarked.as_deref() == Some("true")
    }
}

fn store_failure(message: &'static str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}

/// Persist a generation.
#[instrument(skip_all)]
pub async fn create_generation(
    State(state): State<AppState>,
    body: Result<Json<NewGeneration>, JsonRejection>,
) -> Response {
    const FAILED: &str = "Failed to save generation";

    let Json(new) = match body {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "Invalid generation payload");
            return store_failure(FAILED);
        }
    };

    match state.store.create(new).await {
        Ok(record) => {
            info!(id = %record.id(), "Generation saved");
            (StatusCode::OK, Json(record)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to save generation");
            store_failure(FAILED)
        }
    }
}

/// List generations, newest first.
#[instrument(skip_all)]
pub async fn list_generations(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    match state.store.list(params.bookmarked_only()).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to fetch generations");
            store_failure("Failed to fetch generations")
        }
    }
}

/// Set or clear the bookmark flag.
#[instrument(skip_all)]
pub async fn update_bookmark(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<BookmarkUpdate>, JsonRejection>,
) -> Response {
    const FAILED: &str = "Failed to update generation";

    let (Path(id), Json(update)) = match (id, body) {
        (Ok(id), Ok(body)) => (id, body),
        (Err(e), _) => {
            error!(error = %e, "Invalid generation id");
            return store_failure(FAILED);
        }
        (_, Err(e)) => {
            error!(error = %e, "Invalid bookmark payload");
            return store_failure(FAILED);
        }
    };

    match state.store.set_bookmark(id, update.is_bookmarked).await {
        Ok(record) => {
            info!(%id, is_bookmarked = update.is_bookmarked, "Bookmark updated");
            (StatusCode::OK, Json(record)).into_response()
        }
        Err(e) => {
            error!(%id, error = %e, "Failed to update generation");
            store_failure(FAILED)
        }
    }
}

/// Delete a generation.
#[instrument(skip_all)]
pub async fn delete_generation(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    const FAILED: &str = "Failed to delete generation";

    let Path(id) = match id {
        Ok(id) => id,
        Err(e) => {
            error!(error = %e, "Invalid generation id");
            return store_failure(FAILED);
        }
    };

    match state.store.delete(id).await {
        Ok(()) => {
            info!(%id, "Generation deleted");
            (StatusCode::OK, Json(json!({ "success": true }))).into_response()
        }
        Err(e) => {
            error!(%id, error = %e, "Failed to delete generation");
            store_failure(FAILED)
        }
    }
}
