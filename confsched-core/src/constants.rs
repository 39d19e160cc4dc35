/// Google Calendar "render" endpoint used for add-to-calendar links
pub const GOOGLE_CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// Compact UTC timestamp format shared by Google Calendar links and ICS
pub const COMPACT_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Default conference dates used until an administrator saves settings
pub const DEFAULT_CONFERENCE_START: (i32, u32, u32) = (2025, 7, 17);
pub const DEFAULT_CONFERENCE_END: (i32, u32, u32) = (2025, 7, 22);

pub const DEFAULT_PORT: u16 = 4096;

pub const STORE_FILE_NAME: &str = "store.json";
