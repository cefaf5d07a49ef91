use super::duty_status::DutyStatus;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// One contiguous interval a driver spent in a given duty status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DutyStatusEntry {
    pub id: i64,                           // ⇔ duty_entries.id (0 until stored)
    pub driver_id: String,                 // ⇔ duty_entries.driver_id
    pub status: DutyStatus,                // ⇔ duty_entries.status ('OFF','ON','D','SB')
    pub start_time: DateTime<Utc>,         // ⇔ duty_entries.start_time (RFC3339)
    pub end_time: Option<DateTime<Utc>>,   // ⇔ duty_entries.end_time (NULL = ongoing)
    pub location: String,                  // ⇔ duty_entries.location
}

impl DutyStatusEntry {
    /// A new, still open entry.
    pub fn open(
        driver_id: &str,
        status: DutyStatus,
        start_time: DateTime<Utc>,
        location: &str,
    ) -> Self {
        Self {
            id: 0,
            driver_id: driver_id.to_string(),
            status,
            start_time,
            end_time: None,
            location: location.to_string(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// End of the interval as seen at `now`: open entries end at `now`.
    pub fn effective_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.end_time {
            Some(end) if end < now => end,
            _ => now,
        }
    }

    /// Duration as of `now`, clipped to `[start_time, now]`. Never negative.
    pub fn duration_at(&self, now: DateTime<Utc>) -> Duration {
        let end = self.effective_end(now);
        if end <= self.start_time {
            Duration::zero()
        } else {
            end - self.start_time
        }
    }

    pub fn minutes_at(&self, now: DateTime<Utc>) -> i64 {
        self.duration_at(now).num_minutes()
    }
}
