//! Time label formatting for track rows.

use std::time::Duration;

/// Format a second count as `M:SS`.
///
/// Non-finite input renders as "0:00"; negative input clamps to zero.
/// Minutes are not padded: 65 seconds is "1:05", 3599 is "59:59".
pub fn format_seconds(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "0:00".to_string();
    }
    let seconds = seconds.max(0.0);
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", mins, secs)
}

/// Format a `Duration` as `M:SS`.
pub fn format_duration(d: Duration) -> String {
    format_seconds(d.as_secs_f64())
}
