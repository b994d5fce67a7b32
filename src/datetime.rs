//! Datetime parsing and UTC normalisation.
//!
//! Values that carry an offset are converted to UTC. Values without zone
//! information are read as UTC, never local time, so the same request
//! renders the same wire output on every host.

use crate::error::{DecodeError, DecodeResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse an ISO-8601 instant or calendar date into UTC.
///
/// A bare date means midnight UTC of that day.
pub fn parse_datetime(value: &str) -> DecodeResult<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DecodeError::malformed(value, "empty datetime"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DecodeError::malformed(value, "expected an ISO-8601 date or datetime"))
}

/// Render a datetime in UTC with a trailing `Z`.
///
/// Sub-second digits appear only when the value has them.
pub fn encode_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Render a zone-less datetime, reading it as UTC.
pub fn encode_naive(value: &NaiveDateTime) -> String {
    encode_datetime(&value.and_utc())
}
