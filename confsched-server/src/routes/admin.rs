//! Administrator endpoints: conference settings and the email list

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};

use confsched_core::email_list::{EmailEntry, NewEmail};
use confsched_core::schedule::{ConferenceSettings, SettingsUpdate};

use crate::routes::{AppError, MessageResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/settings", get(get_settings).put(update_settings))
        .route("/api/admin/emails", get(list_emails).post(add_email))
        .route("/api/admin/emails/{id}", delete(delete_email))
}

/// GET /api/admin/settings - Current settings, defaults on first use
async fn get_settings(State(state): State<AppState>) -> Result<Json<ConferenceSettings>, AppError> {
    Ok(Json(state.store().settings()?))
}

/// PUT /api/admin/settings - Save conference dates, address and notes
async fn update_settings(
    State(state): State<AppState>,
    Json(req): Json<SettingsUpdate>,
) -> Result<Json<ConferenceSettings>, AppError> {
    let settings = state.store().update_settings(req)?;

    tracing::info!(
        start = %settings.start_date,
        end = %settings.end_date,
        "Conference settings updated"
    );
    Ok(Json(settings))
}

/// GET /api/admin/emails - Email list, newest first
async fn list_emails(State(state): State<AppState>) -> Result<Json<Vec<EmailEntry>>, AppError> {
    Ok(Json(state.store().list_emails()?))
}

/// POST /api/admin/emails - Add someone to the email list
async fn add_email(
    State(state): State<AppState>,
    Json(req): Json<NewEmail>,
) -> Result<(StatusCode, Json<EmailEntry>), AppError> {
    let entry = state.store().add_email(req)?;

    tracing::info!(id = %entry.id, role = %entry.role, "Email added");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/admin/emails/{id}
async fn delete_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.store().delete_email(&id)?;

    tracing::info!(id = %id, "Email deleted");
    Ok(MessageResponse::new("Email deleted successfully"))
}
