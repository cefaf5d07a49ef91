//! Formatting utilities used for CLI and export outputs.

use crate::models::duty_status::DutyStatus;

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Human-readable label and ANSI color for a duty status.
pub fn describe_status(status: DutyStatus) -> (String, &'static str) {
    match status {
        DutyStatus::OffDuty => (status.label().into(), "\x1b[34m"),
        DutyStatus::SleeperBerth => (status.label().into(), "\x1b[36m"),
        DutyStatus::Driving => (status.label().into(), "\x1b[32m"),
        DutyStatus::OnDuty => (status.label().into(), "\x1b[33m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_minutes() {
        assert_eq!(mins2readable(145, false, false), "02h 25m");
        assert_eq!(mins2readable(-70, true, true), "-01:10");
        assert_eq!(mins2readable(0, true, true), "00:00");
    }
}
