//! Conference event types.
//!
//! `Event` is the stored record; `CalendarEvent` is the wire-shaped view with
//! instants still as ISO-8601 strings. Both implement `ScheduleEntry`, which
//! is all the day matcher and the export builder need.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfResult;
use crate::instant::parse_instant;

/// Anything that can be placed on the conference calendar.
pub trait ScheduleEntry {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn location(&self) -> &str;

    /// Start instant; offset-less values are resolved in `tz`
    fn start_instant<Tz: TimeZone>(&self, tz: &Tz) -> ConfResult<DateTime<Utc>>;

    /// End instant; offset-less values are resolved in `tz`
    fn end_instant<Tz: TimeZone>(&self, tz: &Tz) -> ConfResult<DateTime<Utc>>;
}

impl<T: ScheduleEntry + ?Sized> ScheduleEntry for &T {
    fn title(&self) -> &str {
        (**self).title()
    }

    fn description(&self) -> &str {
        (**self).description()
    }

    fn location(&self) -> &str {
        (**self).location()
    }

    fn start_instant<Tz: TimeZone>(&self, tz: &Tz) -> ConfResult<DateTime<Utc>> {
        (**self).start_instant(tz)
    }

    fn end_instant<Tz: TimeZone>(&self, tz: &Tz) -> ConfResult<DateTime<Utc>> {
        (**self).end_instant(tz)
    }
}

/// Event as received from (or sent to) a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub start_time: String,
    pub end_time: String,
}

impl ScheduleEntry for CalendarEvent {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn start_instant<Tz: TimeZone>(&self, tz: &Tz) -> ConfResult<DateTime<Utc>> {
        parse_instant(&self.start_time, tz)
    }

    fn end_instant<Tz: TimeZone>(&self, tz: &Tz) -> ConfResult<DateTime<Utc>> {
        parse_instant(&self.end_time, tz)
    }
}

/// A stored conference event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn new(draft: EventDraft) -> Self {
        let now = Utc::now();
        Event {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            location: draft.location,
            start_time: draft.start_time,
            end_time: draft.end_time,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields, keeping id and creation time
    pub fn apply(&mut self, draft: EventDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.location = draft.location;
        self.start_time = draft.start_time;
        self.end_time = draft.end_time;
        self.updated_at = Utc::now();
    }
}

impl ScheduleEntry for Event {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn start_instant<Tz: TimeZone>(&self, _tz: &Tz) -> ConfResult<DateTime<Utc>> {
        Ok(self.start_time)
    }

    fn end_instant<Tz: TimeZone>(&self, _tz: &Tz) -> ConfResult<DateTime<Utc>> {
        Ok(self.end_time)
    }
}

/// Editable fields of an event, with instants already resolved
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// A comment left on an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub event_id: String,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A file attached to an event. `path` is where the file is served from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFile {
    pub id: String,
    pub event_id: String,
    pub filename: String,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

/// An event together with its comments and attachments
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[serde(flatten)]
    pub event: Event,
    pub comments: Vec<Comment>,
    pub files: Vec<EventFile>,
}

impl ScheduleEntry for EventDetails {
    fn title(&self) -> &str {
        &self.event.title
    }

    fn description(&self) -> &str {
        &self.event.description
    }

    fn location(&self) -> &str {
        &self.event.location
    }

    fn start_instant<Tz: TimeZone>(&self, tz: &Tz) -> ConfResult<DateTime<Utc>> {
        self.event.start_instant(tz)
    }

    fn end_instant<Tz: TimeZone>(&self, tz: &Tz) -> ConfResult<DateTime<Utc>> {
        self.event.end_instant(tz)
    }
}
