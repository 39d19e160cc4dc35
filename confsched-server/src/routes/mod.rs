pub mod admin;
pub mod comments;
pub mod events;
pub mod files;
pub mod schedule;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use confsched_core::ConfError;
use serde::Serialize;

use crate::state::AppState;

/// All API routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(events::router())
        .merge(comments::router())
        .merge(files::router())
        .merge(admin::router())
        .merge(schedule::router())
        .with_state(state)
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body for successful deletes
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(MessageResponse {
            message: message.into(),
        })
    }
}

/// Convert anyhow errors to HTTP responses
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<ConfError>() {
            Some(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Some(e) if e.is_invalid_input() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, %status, "Request rejected");
        }

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
