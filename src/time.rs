//! Timestamp parsing and relative-age formatting.
//!
//! Post IDs are ISO-8601 timestamps. Previews show them as a short age such as
//! `5min`, `3h` or `2d`.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use thiserror::Error;
use tracing::debug;

/// Age shown when a timestamp cannot be parsed.
pub const FALLBACK_AGE: &str = "1h";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognised timestamp {0:?}")]
pub struct TimestampError(pub String);

pub fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let trimmed = s.trim();
    let normalized = match trimmed.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => trimmed.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(dt);
    }
    // Example: 2025-08-20T15:23:45+0200
    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Ok(dt);
        }
    }

    // Without an offset the timestamp is read as local time.
    parse_naive(&normalized)
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| TimestampError(s.to_string()))
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Time elapsed between `timestamp` and `now`.
///
/// Negative when the timestamp lies in the future.
pub fn elapsed_at(timestamp: &str, now: DateTime<Utc>) -> Result<TimeDelta, TimestampError> {
    let then = parse_timestamp(timestamp)?;
    Ok(now.with_timezone(then.offset()) - then)
}

/// Coarse age of a post, truncated to the largest whole unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeAge {
    Days(i64),
    Hours(i64),
    /// Never less than one.
    Minutes(i64),
}

impl From<TimeDelta> for RelativeAge {
    fn from(elapsed: TimeDelta) -> Self {
        if elapsed >= TimeDelta::days(1) {
            RelativeAge::Days(elapsed.num_days())
        } else if elapsed >= TimeDelta::hours(1) {
            RelativeAge::Hours(elapsed.num_hours())
        } else {
            RelativeAge::Minutes(elapsed.num_minutes().max(1))
        }
    }
}

impl std::fmt::Display for RelativeAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelativeAge::Days(days) => write!(f, "{days}d"),
            RelativeAge::Hours(hours) => write!(f, "{hours}h"),
            RelativeAge::Minutes(minutes) => write!(f, "{minutes}min"),
        }
    }
}

/// Format the age of `timestamp` relative to the current time.
pub fn format_relative_time(timestamp: &str) -> String {
    format_relative_time_at(timestamp, Utc::now())
}

/// Format the age of `timestamp` relative to `now`.
///
/// Unparsable timestamps render as [`FALLBACK_AGE`].
pub fn format_relative_time_at(timestamp: &str, now: DateTime<Utc>) -> String {
    match elapsed_at(timestamp, now) {
        Ok(elapsed) => RelativeAge::from(elapsed).to_string(),
        Err(e) => {
            debug!("{e}, using fallback age");
            FALLBACK_AGE.to_string()
        }
    }
}
