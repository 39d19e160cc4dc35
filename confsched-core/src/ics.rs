//! Whole-schedule ICS feed.
//!
//! Unlike the single-event export, this goes through the icalendar crate so
//! the feed carries UIDs and DTSTAMPs and can be subscribed to.

use icalendar::{Calendar, Component, EventLike};

use crate::event::Event;
use crate::instant::to_compact_utc;

/// Generate one VCALENDAR holding every event of the conference
pub fn generate_schedule_ics<'a, I>(name: &str, events: I) -> String
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut cal = Calendar::new();
    cal.name(name);

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event.id);
        ics_event.summary(&event.title);

        // DTSTAMP from the last edit keeps the feed stable between requests
        ics_event.add_property("DTSTAMP", to_compact_utc(&event.updated_at));
        ics_event.add_property("DTSTART", to_compact_utc(&event.start_time));
        ics_event.add_property("DTEND", to_compact_utc(&event.end_time));

        if !event.description.is_empty() {
            ics_event.description(&event.description);
        }
        if !event.location.is_empty() {
            ics_event.location(&event.location);
        }

        cal.push(ics_event.done());
    }

    let cal = cal.done();
    strip_ics_bloat(&cal.to_string())
}

/// Replace the crate's PRODID and drop the implied CALSCALE
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:-//confsched//schedule//EN\r\n");
            continue;
        }
        if line == "CALSCALE:GREGORIAN" {
            continue;
        }
        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDraft;
    use chrono::{TimeZone, Utc};
    use icalendar::parser::{read_calendar, unfold};

    fn make_event(title: &str, hour: u32) -> Event {
        let start = Utc.with_ymd_and_hms(2025, 7, 17, hour, 0, 0).unwrap();
        Event::new(EventDraft {
            title: title.to_string(),
            description: "Multi\nline".to_string(),
            location: "Hall A".to_string(),
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
        })
    }

    #[test]
    fn test_schedule_has_one_vevent_per_event() {
        let events = vec![make_event("Keynote", 9), make_event("Lunch", 12)];

        let ics = generate_schedule_ics("Conference", &events);
        let unfolded = unfold(&ics);
        let calendar = read_calendar(&unfolded).unwrap();

        let summaries: Vec<String> = calendar
            .components
            .iter()
            .filter(|c| c.name == "VEVENT")
            .filter_map(|c| c.find_prop("SUMMARY").map(|p| p.val.to_string()))
            .collect();
        assert_eq!(summaries, vec!["Keynote", "Lunch"]);
    }

    #[test]
    fn test_schedule_uses_event_ids_and_utc_times() {
        let event = make_event("Keynote", 9);

        let ics = generate_schedule_ics("Conference", [&event]);

        assert!(ics.contains(&format!("UID:{}", event.id)), "{ics}");
        assert!(ics.contains("DTSTART:20250717T090000Z"), "{ics}");
        assert!(ics.contains("DTEND:20250717T100000Z"), "{ics}");
        assert!(ics.contains("PRODID:-//confsched//schedule//EN"));
        assert!(!ics.contains("CALSCALE"));
    }

    #[test]
    fn test_schedule_is_stable_between_calls() {
        let events = vec![make_event("Keynote", 9)];

        assert_eq!(
            generate_schedule_ics("Conference", &events),
            generate_schedule_ics("Conference", &events)
        );
    }

    #[test]
    fn test_empty_schedule_is_still_a_calendar() {
        let ics = generate_schedule_ics("Conference", std::iter::empty());

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }
}
