//! Event endpoints and calendar exports

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use confsched_core::export::ics_file_name;
use confsched_core::ics::generate_schedule_ics;
use confsched_core::{ConfResult, EventDetails, EventDraft, ExportLinks};

use crate::routes::{AppError, MessageResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route(
            "/api/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/api/events/{id}/export", get(export_event))
        .route("/api/events/{id}/ics", get(download_event_ics))
        .route("/api/calendar.ics", get(download_schedule_ics))
}

#[derive(Deserialize)]
pub struct EventsQuery {
    /// Only return events starting on this day of the month
    pub day: Option<u32>,
}

/// Request body for creating or updating an event
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub start_time: String,
    pub end_time: String,
}

impl EventRequest {
    fn into_draft(self, state: &AppState) -> ConfResult<EventDraft> {
        Ok(EventDraft {
            start_time: state.parse_instant(&self.start_time)?,
            end_time: state.parse_instant(&self.end_time)?,
            title: self.title,
            description: self.description.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
        })
    }
}

/// GET /api/events - List events, optionally for one day
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Vec<EventDetails>>, AppError> {
    let events = state.store().list_events()?;

    let events = match query.day {
        Some(day) => state.events_for_day(events, day),
        None => events,
    };

    tracing::debug!(count = events.len(), day = ?query.day, "Listing events");
    Ok(Json(events))
}

/// GET /api/events/{id}
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EventDetails>, AppError> {
    Ok(Json(state.store().get_event(&id)?))
}

/// POST /api/events - Create a new event
async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<EventRequest>,
) -> Result<(StatusCode, Json<EventDetails>), AppError> {
    let draft = req.into_draft(&state)?;
    let event = state.store().create_event(draft)?;

    tracing::info!(id = %event.event.id, title = %event.event.title, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/{id} - Replace an event's fields
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<EventRequest>,
) -> Result<Json<EventDetails>, AppError> {
    let draft = req.into_draft(&state)?;
    let event = state.store().update_event(&id, draft)?;

    tracing::info!(id = %id, "Event updated");
    Ok(Json(event))
}

/// DELETE /api/events/{id} - Delete an event with its comments and files
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.store().delete_event(&id)?;

    tracing::info!(id = %id, "Event deleted");
    Ok(MessageResponse::new("Event deleted successfully"))
}

/// GET /api/events/{id}/export - Google Calendar link and ICS text
async fn export_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExportLinks>, AppError> {
    let event = state.store().get_event(&id)?;
    Ok(Json(state.export_links(&event)?))
}

/// GET /api/events/{id}/ics - Download a single event as .ics
async fn download_event_ics(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let event = state.store().get_event(&id)?;
    let links = state.export_links(&event)?;

    Ok(ics_response(&ics_file_name(&event.event.title), links.ics_text))
}

/// GET /api/calendar.ics - Download the whole schedule
async fn download_schedule_ics(State(state): State<AppState>) -> Result<Response, AppError> {
    let settings = state.store().settings()?;
    let events = state.store().list_events()?;

    let name = format!("Conference {}", settings.start_date.format("%B %Y"));
    let ics = generate_schedule_ics(&name, events.iter().map(|details| &details.event));

    Ok(ics_response("schedule.ics", ics))
}

fn ics_response(file_name: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::routes::testing::{app, create_event, send, send_raw};

    #[tokio::test]
    async fn test_create_and_list_sorted_by_start() {
        let app = app();
        create_event(&app, "Closing", "2025-07-18T16:00:00Z", "2025-07-18T17:00:00Z").await;
        create_event(&app, "Keynote", "2025-07-17T09:00:00Z", "2025-07-17T10:00:00Z").await;

        let (status, body) = send(&app, Method::GET, "/api/events", None).await;

        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Keynote", "Closing"]);
        assert!(body[0]["comments"].as_array().unwrap().is_empty());
        assert!(body[0]["files"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_filtered_by_day() {
        let app = app();
        create_event(&app, "Thursday", "2025-07-17T09:00:00Z", "2025-07-17T10:00:00Z").await;
        create_event(&app, "Friday", "2025-07-18T09:00:00Z", "2025-07-18T10:00:00Z").await;

        let (status, body) = send(&app, Method::GET, "/api/events?day=18", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["title"], "Friday");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_date() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/events",
            Some(json!({
                "title": "Broken",
                "startTime": "next tuesday",
                "endTime": "2025-07-17T10:00:00Z",
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("next tuesday"));
    }

    #[tokio::test]
    async fn test_update_and_missing_event() {
        let app = app();
        let id = create_event(
            &app,
            "Keynote",
            "2025-07-17T09:00:00Z",
            "2025-07-17T10:00:00Z",
        )
        .await;

        let update = json!({
            "title": "Opening keynote",
            "description": "Welcome",
            "location": "Main hall",
            "startTime": "2025-07-17T09:30:00Z",
            "endTime": "2025-07-17T10:30:00Z",
        });

        let (status, body) =
            send(&app, Method::PUT, &format!("/api/events/{id}"), Some(update.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Opening keynote");
        assert_eq!(body["startTime"], "2025-07-17T09:30:00Z");

        let (status, body) = send(&app, Method::PUT, "/api/events/missing", Some(update)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().starts_with("Event not found"));
    }

    #[tokio::test]
    async fn test_delete_event() {
        let app = app();
        let id = create_event(
            &app,
            "Keynote",
            "2025-07-17T09:00:00Z",
            "2025-07-17T10:00:00Z",
        )
        .await;

        let (status, body) = send(&app, Method::DELETE, &format!("/api/events/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Event deleted successfully");

        let (status, _) = send(&app, Method::DELETE, &format!("/api/events/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::GET, &format!("/api/events/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_export_links() {
        let app = app();
        let id = create_event(
            &app,
            "Keynote",
            "2025-07-17T14:00:00Z",
            "2025-07-17T15:00:00Z",
        )
        .await;

        let (status, body) =
            send(&app, Method::GET, &format!("/api/events/{id}/export"), None).await;

        assert_eq!(status, StatusCode::OK);
        let google_url = body["googleUrl"].as_str().unwrap();
        assert!(google_url.contains("dates=20250717T140000Z/20250717T150000Z"));
        assert!(google_url.contains("text=Keynote"));
        let ics = body["icsText"].as_str().unwrap();
        assert!(ics.contains("DTSTART:20250717T140000Z\r\n"));
        assert!(ics.contains("SUMMARY:Keynote\r\n"));
        assert!(ics.contains("LOCATION:Hall A\r\n"));
    }

    #[tokio::test]
    async fn test_download_event_ics() {
        let app = app();
        let id = create_event(
            &app,
            "Opening Keynote",
            "2025-07-17T14:00:00Z",
            "2025-07-17T15:00:00Z",
        )
        .await;

        let (status, content_type, body) =
            send_raw(&app, Method::GET, &format!("/api/events/{id}/ics"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/calendar; charset=utf-8"));
        assert!(body.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(body.contains("SUMMARY:Opening Keynote\r\n"));
    }

    #[tokio::test]
    async fn test_download_schedule_ics() {
        let app = app();
        create_event(&app, "Keynote", "2025-07-17T09:00:00Z", "2025-07-17T10:00:00Z").await;
        create_event(&app, "Lunch", "2025-07-17T12:00:00Z", "2025-07-17T13:00:00Z").await;

        let (status, content_type, body) =
            send_raw(&app, Method::GET, "/api/calendar.ics", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/calendar; charset=utf-8"));
        assert_eq!(body.matches("BEGIN:VEVENT").count(), 2);
    }
}
