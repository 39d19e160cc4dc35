//! File attachment endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
};

use confsched_core::EventFile;
use confsched_core::store::NewFile;

use crate::routes::{AppError, MessageResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events/{id}/files", post(attach_file))
        .route("/api/files/{id}", delete(delete_file))
}

/// POST /api/events/{id}/files - Attach a file to an event
async fn attach_file(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<NewFile>,
) -> Result<(StatusCode, Json<EventFile>), AppError> {
    let file = state.store().attach_file(&event_id, req)?;

    tracing::info!(id = %file.id, event_id = %event_id, filename = %file.filename, "File attached");
    Ok((StatusCode::CREATED, Json(file)))
}

/// DELETE /api/files/{id}
async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.store().delete_file(&id)?;
    Ok(MessageResponse::new("File deleted successfully"))
}
