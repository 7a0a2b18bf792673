//! Timestamp formatting utilities
//!
//! Pure conversions between epoch seconds and strftime-formatted strings,
//! either in UTC or in the local time zone.

use super::error::{LoggerError, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt::{self, Write};

/// Default console timestamp format: `2025-01-08T10:30:45`
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format a `DateTime` with a strftime-compatible format string.
///
/// # Errors
///
/// Returns [`LoggerError::TimeFormatError`] if `format` contains an invalid
/// specifier.
///
/// # Examples
///
/// ```
/// use rust_logger_facade::core::timestamp::format_datetime;
/// use chrono::{TimeZone, Utc};
///
/// let datetime = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(format_datetime(&datetime, "%Y%m%d").unwrap(), "20250108");
/// ```
pub fn format_datetime<Tz>(datetime: &DateTime<Tz>, format: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = String::with_capacity(format.len() + 16);
    write!(out, "{}", datetime.format(format))
        .map_err(|_| LoggerError::time_format(format, "invalid format specifier"))?;
    Ok(out)
}

/// Format epoch seconds, in UTC when `utc` is set and local time otherwise.
///
/// # Errors
///
/// Fails on an invalid format or a timestamp chrono cannot represent.
pub fn format_time(epoch_secs: i64, format: &str, utc: bool) -> Result<String> {
    let datetime = DateTime::<Utc>::from_timestamp(epoch_secs, 0)
        .ok_or_else(|| LoggerError::time_format(format, "timestamp out of range"))?;

    if utc {
        format_datetime(&datetime, format)
    } else {
        format_datetime(&datetime.with_timezone(&Local), format)
    }
}

/// Parse a formatted string back to epoch seconds.
///
/// Formats without a time component (e.g. `%Y%m%d`) parse as midnight.
///
/// # Errors
///
/// Returns [`LoggerError::TimeFormatError`] if `text` does not match
/// `format`, or if the local time does not exist (DST gap).
pub fn parse_time(text: &str, format: &str, utc: bool) -> Result<i64> {
    let naive = NaiveDateTime::parse_from_str(text, format)
        .or_else(|_| {
            NaiveDate::parse_from_str(text, format)
                .map(|date| date.and_hms_opt(0, 0, 0).unwrap_or_default())
        })
        .map_err(|e| LoggerError::time_format(format, e.to_string()))?;

    if utc {
        Ok(naive.and_utc().timestamp())
    } else {
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|datetime| datetime.timestamp())
            .ok_or_else(|| LoggerError::time_format(format, "nonexistent local time"))
    }
}
