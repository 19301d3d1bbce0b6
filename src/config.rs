//! Assistant configuration.
//!
//! The surrounding layer hands the core a flat key-to-value map (merged from
//! CLI options and config files, both out of scope here). Everything is
//! parsed and validated up front; a malformed value fails before any events
//! are fetched.

use std::collections::HashMap;

use chrono::{Duration, NaiveTime};

use crate::error::{CalassistError, CalassistResult};
use crate::predicates::PredicateFilter;

pub const KEY_MEETING_LENGTH: &str = "meeting-length";
pub const KEY_START_OF_DAY: &str = "start-of-day";
pub const KEY_END_OF_DAY: &str = "end-of-day";
pub const KEY_ATTENDEES: &str = "attendees";
pub const KEY_MUST_BE: &str = "must-be";
pub const KEY_MUST_NOT_BE: &str = "must-not-be";

/// Parsed assistant settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum availability block length.
    pub meeting_length: Duration,
    /// Start of business hours.
    pub start_of_day: NaiveTime,
    /// End of business hours.
    pub end_of_day: NaiveTime,
    /// Calendars to consult; "me" is the local account.
    pub attendees: Vec<String>,
    /// Predicate filter applied when finding events.
    pub filter: PredicateFilter,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            meeting_length: Duration::minutes(30),
            start_of_day: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_of_day: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            attendees: vec!["me".to_string()],
            filter: PredicateFilter::default(),
        }
    }
}

impl Config {
    /// Build a config from the flat options map, falling back to defaults
    /// for absent keys.
    pub fn from_options(options: &HashMap<String, String>) -> CalassistResult<Self> {
        let mut config = Config::default();

        if let Some(value) = options.get(KEY_MEETING_LENGTH) {
            config.meeting_length = parse_duration(value)?;
        }
        if let Some(value) = options.get(KEY_START_OF_DAY) {
            config.start_of_day = parse_time_of_day(value)?;
        }
        if let Some(value) = options.get(KEY_END_OF_DAY) {
            config.end_of_day = parse_time_of_day(value)?;
        }
        if let Some(value) = options.get(KEY_ATTENDEES) {
            config.attendees = split_list(value);
        }

        let must_be = options.get(KEY_MUST_BE).map(|v| split_list(v)).unwrap_or_default();
        let must_not_be = options
            .get(KEY_MUST_NOT_BE)
            .map(|v| split_list(v))
            .unwrap_or_default();
        config.filter = PredicateFilter::new(&must_be, &must_not_be)?;

        Ok(config)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split([',', ' '])
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Parse a duration string like "30m" or "2h".
pub fn parse_duration(value: &str) -> CalassistResult<Duration> {
    let std = humantime::parse_duration(value.trim())
        .map_err(|_| CalassistError::InvalidDuration(value.to_string()))?;
    Duration::from_std(std).map_err(|_| CalassistError::InvalidDuration(value.to_string()))
}

/// Parse a time-of-day string like "9am", "9:30am", or "18:30".
pub fn parse_time_of_day(value: &str) -> CalassistResult<NaiveTime> {
    let err = || CalassistError::InvalidTimeOfDay(value.to_string());
    let raw = value.trim().to_ascii_lowercase();

    let (body, meridiem) = if let Some(b) = raw.strip_suffix("am") {
        (b.trim_end(), Some("am"))
    } else if let Some(b) = raw.strip_suffix("pm") {
        (b.trim_end(), Some("pm"))
    } else {
        (raw.as_str(), None)
    };

    let (hour_str, minute_str) = match body.split_once(':') {
        Some((h, m)) => (h, m),
        None => (body, "0"),
    };
    let hour: u32 = hour_str.parse().map_err(|_| err())?;
    let minute: u32 = minute_str.parse().map_err(|_| err())?;

    let hour = match meridiem {
        Some(_) if hour == 0 || hour > 12 => return Err(err()),
        Some("am") if hour == 12 => 0,
        Some("pm") if hour < 12 => hour + 12,
        _ => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(err)
}
