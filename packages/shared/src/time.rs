//! Wall-clock helpers for transcript display.

use chrono::{DateTime, Local, TimeZone};

/// Get the current Unix timestamp (milliseconds)
pub fn now_millis() -> i64 {
    Local::now().timestamp_millis()
}

/// Convert a Unix timestamp (milliseconds) to a short `HH:MM:SS` clock string.
///
/// Returns `None` when the timestamp is out of range for `chrono`.
pub fn timestamp_to_clock(timestamp_millis: i64) -> Option<String> {
    local_datetime(timestamp_millis).map(|dt| dt.format("%H:%M:%S").to_string())
}

fn local_datetime(timestamp_millis: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(timestamp_millis).single()
}
