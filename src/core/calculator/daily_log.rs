//! Chronological daily record of duty status (the "graph grid"), split at
//! home-terminal calendar-day boundaries.

use crate::core::status::validate_log;
use crate::errors::{AppError, AppResult};
use crate::models::daily_log::{DailyLog, DaySegment};
use crate::models::duty_status::DutyStatus;
use crate::models::entry::DutyStatusEntry;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

/// UTC bounds `[start, end)` of a calendar day in the given offset.
pub fn day_bounds(
    day: NaiveDate,
    offset: &FixedOffset,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::InvalidDate(day.to_string()))?;
    let start = offset
        .from_local_datetime(&midnight)
        .single()
        .ok_or_else(|| AppError::InvalidDate(day.to_string()))?
        .with_timezone(&Utc);
    Ok((start, start + Duration::days(1)))
}

/// Build the log of one day as seen at `now`.
pub fn build_daily_log(
    entries: &[DutyStatusEntry],
    now: DateTime<Utc>,
    offset: &FixedOffset,
    day: NaiveDate,
) -> AppResult<DailyLog> {
    validate_log(entries)?;

    let (day_start, day_end) = day_bounds(day, offset)?;

    let mut log = DailyLog {
        day: Some(day),
        segments: Vec::new(),
        totals: DutyStatus::ALL
            .iter()
            .map(|s| (s.code().to_string(), 0))
            .collect(),
    };

    for e in entries {
        if e.start_time >= day_end || e.start_time > now {
            break;
        }

        let seg_start = e.start_time.max(day_start);
        let seg_end = e.effective_end(now).min(day_end);
        if seg_end <= seg_start {
            continue;
        }

        // Minute marks counted from midnight: segments always add up to the
        // whole minutes elapsed in the day, whatever seconds the boundaries carry.
        let minutes = (seg_end - day_start).num_minutes() - (seg_start - day_start).num_minutes();
        *log.totals.entry(e.status.code().to_string()).or_insert(0) += minutes;

        log.segments.push(DaySegment {
            entry_id: e.id,
            status: e.status,
            start: seg_start.with_timezone(offset),
            end: seg_end.with_timezone(offset),
            minutes,
            location: e.location.clone(),
            ongoing: e.is_open() && seg_end == now,
        });
    }

    Ok(log)
}

/// One daily log per day in `[from, to]`.
pub fn daily_logs(
    entries: &[DutyStatusEntry],
    now: DateTime<Utc>,
    offset: &FixedOffset,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<DailyLog>> {
    if to < from {
        return Err(AppError::InvalidDate(format!(
            "range end {} precedes start {}",
            to, from
        )));
    }

    let mut out = Vec::new();
    let mut d = from;
    while d <= to {
        out.push(build_daily_log(entries, now, offset, d)?);
        d = d
            .succ_opt()
            .ok_or_else(|| AppError::InvalidDate(d.to_string()))?;
    }
    Ok(out)
}
