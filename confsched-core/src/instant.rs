//! Parsing of event instants as they arrive over the wire.
//!
//! Events carry ISO-8601 strings. Values with an explicit offset (`Z`,
//! `+02:00`) are absolute. A date-time without an offset is wall-clock time in
//! the caller's timezone, while a bare `YYYY-MM-DD` is midnight UTC, matching
//! how JavaScript's `Date` reads ISO strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::constants::COMPACT_UTC_FORMAT;
use crate::error::{ConfError, ConfResult};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 instant, resolving offset-less values in `tz`.
pub fn parse_instant<Tz: TimeZone>(value: &str, tz: &Tz) -> ConfResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| ConfError::InvalidDate(value.to_string()));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| ConfError::InvalidDate(value.to_string()))?;

    // Wall-clock times skipped by a DST jump have no instant
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ConfError::InvalidDate(value.to_string()))
}

/// Render an instant as `YYYYMMDDThhmmssZ`, always in UTC.
pub fn to_compact_utc(instant: &DateTime<Utc>) -> String {
    instant.format(COMPACT_UTC_FORMAT).to_string()
}
