//! Parsing and display of the catalog's `updated` timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Shown wherever a timestamp is missing or unreadable.
pub const UNKNOWN_DATE: &str = "Unknown";

/// Parse an ISO-8601 timestamp. Accepts full RFC 3339, a zone-less
/// date-time (read as UTC) or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Short human date, e.g. `Mar 5, 2024`, or [`UNKNOWN_DATE`].
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => UNKNOWN_DATE.to_string(),
    }
}
