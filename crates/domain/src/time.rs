//! Time and timestamp helpers.

use chrono::{DateTime, SecondsFormat, Utc};

/// UTC timestamp used for a device's `creation_time`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp as fixed-width RFC 3339 with nanoseconds and a `Z`
/// suffix. Lexicographic order of the output equals chronological order.
#[must_use]
pub fn to_storage_string(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse a timestamp previously written by [`to_storage_string`] (any RFC 3339
/// string is accepted and normalised to UTC).
///
/// # Errors
///
/// Returns [`chrono::ParseError`] when `s` is not valid RFC 3339.
pub fn parse_storage_string(s: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|ts| ts.with_timezone(&Utc))
}
