//! Time and timestamp helpers.

use chrono::{DateTime, Local, TimeZone, Utc};

/// UTC timestamp used for call times.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn to_millis(ts: Timestamp) -> i64 {
    ts.timestamp_millis()
}

/// Timestamp for epoch milliseconds, or `None` when out of range.
#[must_use]
pub fn from_millis(millis: i64) -> Option<Timestamp> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Format a timestamp as a 12-hour local clock time, e.g. `03:07:45 PM`.
#[must_use]
pub fn display_time(ts: Timestamp) -> String {
    display_time_in(ts, &Local)
}

/// Same as [`display_time`] but in an explicit time zone.
#[must_use]
pub fn display_time_in<Tz>(ts: Timestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    ts.with_timezone(tz).format("%I:%M:%S %p").to_string()
}
