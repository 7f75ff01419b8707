//! `createdAt` parsing helpers.
//!
//! Stored timestamps are free-form strings written by different producers:
//! form submissions use `YYYY-MM-DD`, imports use RFC 3339 with milliseconds.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a `createdAt` string into an instant.
///
/// Date-only values resolve to UTC midnight; date-times without an offset
/// are read as UTC. Returns `None` for anything unparseable.
pub fn parse_created_at(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Formats an instant the way imports stamp `createdAt`
/// (`2024-01-01T09:30:00.000Z`).
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Formats the date-only `createdAt` used by form submissions.
pub fn format_date_only(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}
