//! Selecting the events shown for one calendar day.
//!
//! The day picker only carries a day-of-month (the conference runs inside a
//! single month), so matching compares that component alone. Month and year
//! are not considered. Keep that rule inside `matches_selected_day` so the
//! comparison can be widened to full dates without touching callers.

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};

use crate::event::ScheduleEntry;

/// True when `start`, seen in `tz`, falls on `selected_day` of any month.
pub fn matches_selected_day<Tz: TimeZone>(
    start: &DateTime<Utc>,
    selected_day: u32,
    tz: &Tz,
) -> bool {
    start.with_timezone(tz).day() == selected_day
}

/// Keep the events whose start falls on `selected_day` in `tz`.
///
/// Order is preserved. Events whose start cannot be parsed are left out.
pub fn events_for_day_in<I, E, Tz>(events: I, selected_day: u32, tz: &Tz) -> Vec<E>
where
    I: IntoIterator<Item = E>,
    E: ScheduleEntry,
    Tz: TimeZone,
{
    events
        .into_iter()
        .filter(|event| match event.start_instant(tz) {
            Ok(start) => matches_selected_day(&start, selected_day, tz),
            Err(e) => {
                tracing::debug!(
                    title = event.title(),
                    error = %e,
                    "Skipping event with invalid start"
                );
                false
            }
        })
        .collect()
}

/// `events_for_day_in` using the host's local timezone.
pub fn events_for_day<I, E>(events: I, selected_day: u32) -> Vec<E>
where
    I: IntoIterator<Item = E>,
    E: ScheduleEntry,
{
    events_for_day_in(events, selected_day, &Local)
}
