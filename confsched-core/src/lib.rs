//! Core types for the confsched conference schedule.
//!
//! - `day_match` picks the events shown for a selected calendar day
//! - `export` builds Google Calendar links and single-event ICS payloads
//! - `store` keeps events, comments, files, settings and the email list
//! - `schedule` and `ics` cover conference dates and the full-schedule feed

pub mod config;
pub mod constants;
pub mod day_match;
pub mod email_list;
pub mod error;
pub mod event;
pub mod export;
pub mod ics;
pub mod instant;
pub mod schedule;
pub mod store;

pub use day_match::{events_for_day, events_for_day_in, matches_selected_day};
pub use error::{ConfError, ConfResult};
pub use event::{CalendarEvent, Comment, Event, EventDetails, EventDraft, EventFile, ScheduleEntry};
pub use export::{ExportLinks, build_export_links, build_export_links_in};
pub use store::Store;
