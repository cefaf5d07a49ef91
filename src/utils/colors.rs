/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Remaining-time color:
/// 0 → red
/// under an hour → yellow
/// otherwise → green
pub fn color_for_remaining(minutes: i64) -> &'static str {
    if minutes <= 0 {
        RED
    } else if minutes < 60 {
        YELLOW
    } else {
        GREEN
    }
}
