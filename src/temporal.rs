use crate::frequency::FrequencyTable;
use crate::projects::SessionRecord;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Session counts by hour of day (0-23) and weekday name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingHours {
    pub hours: FrequencyTable<u32>,
    pub weekdays: FrequencyTable<String>,
}

pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_monday() as usize]
}

/// Parse an ISO-8601 creation time into wall-clock time in its own offset.
///
/// A trailing `Z` is rewritten to `+00:00` first. Timestamps without an
/// offset are taken as-is; a bare date means midnight. No timezone conversion
/// happens, so the hour is the one written in the string.
pub fn parse_created(raw: &str) -> Option<NaiveDateTime> {
    let normalized = raw.trim().replace('Z', "+00:00");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.naive_local());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, fmt) {
            return Some(dt.naive_local());
        }
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Bucket sessions by creation hour and weekday. Sessions whose creation
/// time is missing or unparseable are left out of both histograms.
pub fn analyze_working_hours(sessions: &[SessionRecord]) -> WorkingHours {
    let mut patterns = WorkingHours::default();

    for created in sessions.iter().filter_map(|s| s.created.as_deref()) {
        let Some(dt) = parse_created(created) else {
            log::debug!("Unparseable session timestamp: {}", created);
            continue;
        };
        patterns.hours.increment(dt.hour());
        patterns.weekdays.increment(weekday_name(dt.weekday()).to_string());
    }

    patterns
}
