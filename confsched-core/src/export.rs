//! "Add to calendar" links for a single event.
//!
//! Produces a Google Calendar template URL and a minimal one-event ICS
//! document. Both share the same compact UTC timestamps and the same
//! composite description, so the two exports never disagree.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use url::form_urlencoded;

use crate::constants::GOOGLE_CALENDAR_RENDER_URL;
use crate::error::ConfResult;
use crate::event::ScheduleEntry;
use crate::instant::to_compact_utc;

/// The two export targets for one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportLinks {
    pub google_url: String,
    pub ics_text: String,
}

/// Build export links, resolving offset-less instants in the local timezone.
pub fn build_export_links<E: ScheduleEntry>(event: &E) -> ConfResult<ExportLinks> {
    build_export_links_in(event, &Local)
}

/// Build export links, resolving offset-less instants in `tz`.
///
/// Fails with `ConfError::InvalidDate` when either instant cannot be parsed.
pub fn build_export_links_in<E, Tz>(event: &E, tz: &Tz) -> ConfResult<ExportLinks>
where
    E: ScheduleEntry,
    Tz: TimeZone,
{
    let start = event.start_instant(tz)?;
    let end = event.end_instant(tz)?;

    Ok(export_links(
        event.title(),
        event.description(),
        event.location(),
        &start,
        &end,
    ))
}

fn export_links(
    title: &str,
    description: &str,
    location: &str,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
) -> ExportLinks {
    let start = to_compact_utc(start);
    let end = to_compact_utc(end);
    let details = composite_description(description, location);

    ExportLinks {
        google_url: google_calendar_url(title, &details, location, &start, &end),
        ics_text: ics_text(title, &details, location, &start, &end),
    }
}

/// Download name for an event's .ics file, e.g. `opening-keynote.ics`
pub fn ics_file_name(title: &str) -> String {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        "event.ics".to_string()
    } else {
        format!("{slug}.ics")
    }
}

/// Description followed by a blank line and the location
pub fn composite_description(description: &str, location: &str) -> String {
    format!("{description}\n\nLocation: {location}")
}

fn google_calendar_url(
    title: &str,
    details: &str,
    location: &str,
    start: &str,
    end: &str,
) -> String {
    // The slash between the two timestamps must stay literal
    let dates = format!("{}/{}", encode(start), encode(end));

    let query = [
        ("action", encode("TEMPLATE")),
        ("text", encode(title)),
        ("details", encode(details)),
        ("dates", dates),
        ("location", encode(location)),
    ]
    .iter()
    .map(|(key, value)| format!("{key}={value}"))
    .collect::<Vec<_>>()
    .join("&");

    format!("{GOOGLE_CALENDAR_RENDER_URL}?{query}")
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn ics_text(title: &str, details: &str, location: &str, start: &str, end: &str) -> String {
    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("DTSTART:{start}"),
        format!("DTEND:{end}"),
        format!("SUMMARY:{title}"),
        format!("DESCRIPTION:{}", escape_newlines(details)),
        format!("LOCATION:{location}"),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];

    let mut ics = String::new();
    for line in &lines {
        ics.push_str(line);
        ics.push_str("\r\n");
    }
    ics
}

/// Raw line breaks would end the content line, so write them as `\n`
fn escape_newlines(value: &str) -> String {
    value.replace("\r\n", "\\n").replace(['\r', '\n'], "\\n")
}
