//! Time display helpers

use std::time::Duration;

/// Format seconds as `m:ss`
///
/// Non-finite or negative input renders as `0:00`. Minutes are not
/// wrapped into hours.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a duration as `m:ss`
pub fn format_duration(duration: Duration) -> String {
    format_time(duration.as_secs_f64())
}
