//! Parsing of the clock times, durations and dates found in talk records.
//!
//! Start times are handled as [`NaiveTime`] so they can never be compared
//! against a calendar date by accident. Durations are elapsed lengths written
//! like clock times (`01:30` is ninety minutes).

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;
use thiserror::Error;

/// Pre-compiled regex for `H:MM` / `HH:MM[:SS]` durations.
static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):([0-5]\d)(?::[0-5]\d)?$").unwrap());

/// Offset-less datetime layouts seen in older feeds.
const NAIVE_DATE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Errors for unparseable time values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A time of day was not `HH:MM`.
    #[error("invalid time of day: {value:?}")]
    ClockTime { value: String },
    /// A duration was not `HH:MM`.
    #[error("invalid duration: {value:?}")]
    Duration { value: String },
    /// A talk date was not an ISO 8601 datetime.
    #[error("invalid talk date: {value:?}")]
    Date { value: String },
}

/// Parses a wall-clock time such as `11:00`, `9:5` or `11:00:00`.
pub fn parse_clock_time(value: &str) -> Result<NaiveTime, ParseError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| ParseError::ClockTime {
            value: value.to_string(),
        })
}

/// Parses an elapsed duration such as `00:45` into hours and minutes.
///
/// Seconds are accepted but ignored.
pub fn parse_elapsed(value: &str) -> Result<Duration, ParseError> {
    let invalid = || ParseError::Duration {
        value: value.to_string(),
    };
    let caps = DURATION_RE.captures(value.trim()).ok_or_else(invalid)?;
    let hours: i64 = caps[1].parse().map_err(|_| invalid())?;
    let minutes: i64 = caps[2].parse().map_err(|_| invalid())?;
    Ok(Duration::hours(hours) + Duration::minutes(minutes))
}

/// Parses a talk's start datetime.
///
/// Values without an offset are read as local wall-clock time.
pub fn parse_talk_date(value: &str) -> Result<DateTime<Utc>, ParseError> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ParseError::Date {
            value: value.to_string(),
        })
}
