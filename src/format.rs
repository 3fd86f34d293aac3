// Human-readable byte, rate, percent and uptime strings

use std::time::Duration;

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
const STEP: f64 = 1024.0;

/// Scale `bytes` to the largest unit that keeps the value under 1024 (PB has no upper bound)
/// and render it with two decimals, e.g. `1.00KB`. Zero renders as `0.00B`.
pub fn format_bytes(bytes: f64) -> String {
    let mut size = bytes;
    let mut unit = 0;
    while size >= STEP && unit < UNITS.len() - 1 {
        size /= STEP;
        unit += 1;
    }
    format!("{:.2}{}", size, UNITS[unit])
}

/// Same ladder as [`format_bytes`] with a `/s` suffix.
pub fn format_network_speed(bytes_per_sec: f64) -> String {
    format!("{}/s", format_bytes(bytes_per_sec))
}

pub fn format_percent(percent: f64) -> String {
    format!("{:.0}%", percent)
}

/// `"{days} day(s), HH:MM:SS"`; "day" is singular only for exactly one day.
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    let plural = if days == 1 { "" } else { "s" };
    format!("{days} day{plural}, {hours:02}:{minutes:02}:{seconds:02}")
}
