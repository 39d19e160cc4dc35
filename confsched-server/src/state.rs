use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use confsched_core::instant::parse_instant;
use confsched_core::{
    ConfResult, ExportLinks, ScheduleEntry, Store, build_export_links_in, events_for_day_in,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    /// Zone used for offset-less instants and day matching; host local when unset
    timezone: Option<Tz>,
}

impl AppState {
    pub fn new(store: Store, timezone: Option<Tz>) -> Self {
        AppState {
            store: Arc::new(store),
            timezone,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn parse_instant(&self, value: &str) -> ConfResult<DateTime<Utc>> {
        match &self.timezone {
            Some(tz) => parse_instant(value, tz),
            None => parse_instant(value, &Local),
        }
    }

    pub fn events_for_day<E: ScheduleEntry>(&self, events: Vec<E>, day: u32) -> Vec<E> {
        match &self.timezone {
            Some(tz) => events_for_day_in(events, day, tz),
            None => events_for_day_in(events, day, &Local),
        }
    }

    pub fn export_links<E: ScheduleEntry>(&self, event: &E) -> ConfResult<ExportLinks> {
        match &self.timezone {
            Some(tz) => build_export_links_in(event, tz),
            None => build_export_links_in(event, &Local),
        }
    }
}
