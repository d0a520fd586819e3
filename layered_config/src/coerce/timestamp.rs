//! Timestamp parsing against caller-supplied layouts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::CoercionError;
use crate::value::Value;

const TARGET: &str = "timestamp";

/// Default layout: RFC 3339 timestamps such as `2024-05-01T12:00:00Z`.
///
/// The value doubles as chrono's `%+` specifier, but parsing under this
/// layout goes through [`DateTime::parse_from_rfc3339`].
pub const RFC3339: &str = "%+";

/// Convert a textual `value` into a UTC timestamp using `layout`.
///
/// # Errors
///
/// Returns [`CoercionError`] for non-string values and text that does not
/// match the layout.
pub fn to_timestamp(value: &Value, layout: &str) -> Result<DateTime<Utc>, CoercionError> {
    match value {
        Value::String(text) => parse_timestamp(text, layout),
        other => Err(CoercionError::unsupported(other.kind(), TARGET)),
    }
}

/// Parse `text` with a chrono `strftime` layout.
///
/// Custom layouts are tried as an offset-bearing date-time, then as a naive
/// date-time taken to be UTC, then as a bare date at midnight UTC.
///
/// # Errors
///
/// Returns [`CoercionError::Parse`] when no reading of the layout matches.
pub fn parse_timestamp(text: &str, layout: &str) -> Result<DateTime<Utc>, CoercionError> {
    if layout == RFC3339 {
        return DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| CoercionError::parse(text, TARGET, e));
    }
    DateTime::parse_from_str(text, layout)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(text, layout).map(|dt| dt.and_utc()))
        .or_else(|_| {
            NaiveDate::parse_from_str(text, layout).map(|d| d.and_time(NaiveTime::MIN).and_utc())
        })
        .map_err(|e| CoercionError::parse(text, TARGET, e))
}
