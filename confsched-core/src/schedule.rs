//! Conference dates and the day strip shown above the session list.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_CONFERENCE_END, DEFAULT_CONFERENCE_START};
use crate::error::{ConfError, ConfResult};

const WEEKDAYS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Conference-wide settings managed by administrators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceSettings {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for ConferenceSettings {
    fn default() -> Self {
        let (y, m, d) = DEFAULT_CONFERENCE_START;
        let start_date = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        let (y, m, d) = DEFAULT_CONFERENCE_END;
        let end_date = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

        ConferenceSettings {
            start_date,
            end_date,
            address: String::new(),
            notes: String::new(),
            updated_at: Utc::now(),
        }
    }
}

impl ConferenceSettings {
    pub fn days(&self) -> Vec<ConferenceDay> {
        conference_days(self.start_date, self.end_date)
    }

    /// Day selected when the schedule is first opened
    pub fn first_day_of_month(&self) -> u32 {
        self.start_date.day()
    }
}

/// Settings as submitted by the admin form
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_date")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SettingsUpdate {
    pub fn validate(&self) -> ConfResult<()> {
        if self.end_date < self.start_date {
            return Err(ConfError::Validation(
                "End date must not be before start date".into(),
            ));
        }
        Ok(())
    }
}

/// Accept `YYYY-MM-DD` or a full RFC 3339 timestamp (date part is kept).
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_date(&value).ok_or_else(|| serde::de::Error::custom(format!("Invalid date '{value}'")))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// One cell of the day strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceDay {
    pub date: NaiveDate,
    pub day_of_month: u32,
    pub weekday: &'static str,
}

/// Every day from `start` to `end` inclusive. Empty when `end < start`.
pub fn conference_days(start: NaiveDate, end: NaiveDate) -> Vec<ConferenceDay> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| ConferenceDay {
            date,
            day_of_month: date.day(),
            weekday: WEEKDAYS[date.weekday().num_days_from_sunday() as usize],
        })
        .collect()
}
