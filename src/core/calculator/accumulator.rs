//! Time-budget accounting: driving, on-duty window and rolling cycle.

use crate::core::status::validate_log;
use crate::errors::{AppError, AppResult};
use crate::models::accumulator::{HosAccumulator, Remaining};
use crate::models::entry::DutyStatusEntry;
use crate::models::rule_set::RuleSet;
use chrono::{DateTime, Duration, Utc};

/// Compute the three time budgets of one driver as of `now`.
///
/// `entries` must be the driver's log, oldest-first. The on-duty window is
/// found by walking backward from the newest entry until a contiguous
/// off-duty/sleeper-berth span of at least `qualifying_break_minutes`.
/// The cycle sums on-duty minutes of entries starting inside
/// `[now − cycle_window_days, now]` and is never reset by breaks.
pub fn compute_accumulators(
    entries: &[DutyStatusEntry],
    now: DateTime<Utc>,
    rules: &RuleSet,
) -> AppResult<HosAccumulator> {
    validate_log(entries)?;

    // Durations are summed exactly and truncated to minutes once per total,
    // so second-precision boundaries never drift the budgets.
    let qualifying_break = Duration::minutes(rules.qualifying_break_minutes);
    let mut driving = Duration::zero();
    let mut on_duty = Duration::zero();

    // -----------------------------
    // Current on-duty window
    // -----------------------------
    let mut rest_run = Duration::zero();
    for e in entries.iter().rev() {
        if e.start_time > now {
            continue;
        }
        let spent = e.duration_at(now);

        if e.status.is_rest() {
            rest_run += spent;
            if rest_run >= qualifying_break {
                break;
            }
        } else if spent > Duration::zero() {
            rest_run = Duration::zero();
            on_duty += spent;
            if e.status.is_driving() {
                driving += spent;
            }
        }
    }

    // -----------------------------
    // Rolling cycle
    // -----------------------------
    let window_start = Duration::try_days(rules.cycle_window_days)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| {
            AppError::InvalidRuleSet(format!(
                "cycle window of {} days is out of range",
                rules.cycle_window_days
            ))
        })?;
    let cycle: Duration = entries
        .iter()
        .filter(|e| e.status.is_on_duty())
        .filter(|e| e.start_time >= window_start && e.start_time <= now)
        .map(|e| e.duration_at(now))
        .sum();

    Ok(HosAccumulator {
        driving_minutes: driving.num_minutes(),
        on_duty_minutes: on_duty.num_minutes(),
        cycle_minutes: cycle.num_minutes(),
        as_of: now,
    })
}

/// Minutes left before each limit: `max(0, limit − current)`.
pub fn remaining_minutes(acc: &HosAccumulator, rules: &RuleSet) -> Remaining {
    Remaining {
        driving: (rules.driving_limit_minutes - acc.driving_minutes).max(0),
        on_duty: (rules.on_duty_limit_minutes - acc.on_duty_minutes).max(0),
        cycle: (rules.cycle_limit_minutes() - acc.cycle_minutes).max(0),
    }
}
