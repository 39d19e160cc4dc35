//! Comment endpoints

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use confsched_core::store::NewComment;
use confsched_core::{Comment, ConfError};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/comments", get(list_comments).post(create_comment))
}

#[derive(Deserialize)]
pub struct CommentsQuery {
    #[serde(rename = "eventId")]
    pub event_id: Option<String>,
}

/// GET /api/comments?eventId= - Comments for an event, newest first
async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<CommentsQuery>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let event_id = query
        .event_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ConfError::Validation("Event ID is required".into()))?;

    Ok(Json(state.store().comments_for(&event_id)?))
}

/// POST /api/comments - Comment on an event
async fn create_comment(
    State(state): State<AppState>,
    Json(req): Json<NewComment>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let comment = state.store().add_comment(req)?;

    tracing::info!(id = %comment.id, event_id = %comment.event_id, "Comment created");
    Ok((StatusCode::CREATED, Json(comment)))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::routes::testing::{app, create_event, send};

    #[tokio::test]
    async fn test_comments_require_event_id() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/api/comments", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Event ID is required");

        let (status, _) = send(&app, Method::GET, "/api/comments?eventId=", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_and_list_comments() {
        let app = app();
        let id = create_event(
            &app,
            "Keynote",
            "2025-07-17T09:00:00Z",
            "2025-07-17T10:00:00Z",
        )
        .await;

        for content in ["Great talk", "Slides please"] {
            let (status, body) = send(
                &app,
                Method::POST,
                "/api/comments",
                Some(json!({ "content": content, "eventId": id, "authorName": "Ann" })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(body["authorName"], "Ann");
        }

        let (status, body) =
            send(&app, Method::GET, &format!("/api/comments?eventId={id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let contents: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["content"].as_str().unwrap())
            .collect();
        assert_eq!(contents, vec!["Slides please", "Great talk"]);

        let (_, event) = send(&app, Method::GET, &format!("/api/events/{id}"), None).await;
        assert_eq!(event["comments"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_comment_on_missing_event() {
        let app = app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/comments",
            Some(json!({ "content": "Hello", "eventId": "missing", "authorName": "Ann" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
