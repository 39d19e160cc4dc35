//! Day-strip schedule view

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use confsched_core::EventDetails;
use confsched_core::schedule::{ConferenceDay, ConferenceSettings};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/schedule", get(schedule))
}

#[derive(Deserialize)]
pub struct ScheduleQuery {
    pub day: Option<u32>,
}

/// Everything the calendar page needs for one selected day
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub settings: ConferenceSettings,
    pub days: Vec<ConferenceDay>,
    pub selected_day: u32,
    pub events: Vec<EventDetails>,
}

/// GET /api/schedule?day=N - Conference days plus the events of the selected day
async fn schedule(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let settings = state.store().settings()?;
    let selected_day = query.day.unwrap_or_else(|| settings.first_day_of_month());
    let events = state.events_for_day(state.store().list_events()?, selected_day);

    Ok(Json(ScheduleResponse {
        days: settings.days(),
        settings,
        selected_day,
        events,
    }))
}
