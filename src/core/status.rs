//! Duty status state machine.
//!
//! A driver's log is an append-only sequence of contiguous entries. The only
//! mutation allowed on a stored entry is closing it (`end_time = now`) at the
//! moment the next entry opens. All four statuses are reachable from each
//! other; a change to the current status still closes and reopens.

use crate::errors::{AppError, AppResult};
use crate::models::duty_status::DutyStatus;
use crate::models::entry::DutyStatusEntry;
use chrono::{DateTime, Duration, Utc};

/// Check the structural invariants of a driver's log (oldest-first).
///
/// - `start_time <= end_time` for every closed entry
/// - `entries[i].end_time == entries[i + 1].start_time`
/// - only the most recent entry may be open
pub fn validate_log(entries: &[DutyStatusEntry]) -> AppResult<()> {
    for (i, e) in entries.iter().enumerate() {
        if let Some(end) = e.end_time
            && end < e.start_time
        {
            return Err(AppError::CorruptLog(format!(
                "entry {} ({}) ends at {} before it starts at {}",
                e.id,
                e.status.code(),
                end.to_rfc3339(),
                e.start_time.to_rfc3339()
            )));
        }

        let Some(next) = entries.get(i + 1) else {
            break;
        };

        match e.end_time {
            None => {
                return Err(AppError::CorruptLog(format!(
                    "entry {} is open but is not the most recent entry",
                    e.id
                )));
            }
            Some(end) if end != next.start_time => {
                return Err(AppError::CorruptLog(format!(
                    "entries {} and {} are not contiguous ({} ≠ {})",
                    e.id,
                    next.id,
                    end.to_rfc3339(),
                    next.start_time.to_rfc3339()
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// The single open entry of a log.
pub fn current_entry<'a>(
    driver_id: &str,
    entries: &'a [DutyStatusEntry],
) -> AppResult<&'a DutyStatusEntry> {
    let last = entries
        .last()
        .ok_or_else(|| AppError::NoActiveLog(driver_id.to_string()))?;

    if !last.is_open() {
        return Err(AppError::CorruptLog(format!(
            "driver '{}' has no open entry (last entry {} is closed)",
            driver_id, last.id
        )));
    }
    Ok(last)
}

/// In-memory view of one driver's duty status log.
#[derive(Debug, Clone)]
pub struct DutyLog {
    driver_id: String,
    entries: Vec<DutyStatusEntry>,
}

impl DutyLog {
    pub fn new(driver_id: &str) -> Self {
        Self {
            driver_id: driver_id.to_string(),
            entries: Vec::new(),
        }
    }

    /// Wrap a fetched log, rejecting it if it breaks the log invariants.
    pub fn from_entries(driver_id: &str, entries: Vec<DutyStatusEntry>) -> AppResult<Self> {
        validate_log(&entries)?;

        if let Some(other) = entries.iter().find(|e| e.driver_id != driver_id) {
            return Err(AppError::CorruptLog(format!(
                "entry {} belongs to driver '{}', not '{}'",
                other.id, other.driver_id, driver_id
            )));
        }

        Ok(Self {
            driver_id: driver_id.to_string(),
            entries,
        })
    }

    pub fn driver_id(&self) -> &str {
        &self.driver_id
    }

    pub fn entries(&self) -> &[DutyStatusEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<DutyStatusEntry> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn open_entry(&self) -> Option<&DutyStatusEntry> {
        self.entries.last().filter(|e| e.is_open())
    }

    /// Close the open entry at `now` and append a new open entry.
    ///
    /// Returns the appended entry. The entry id is left untouched (0) for
    /// the store to assign.
    pub fn change_status(
        &mut self,
        status: DutyStatus,
        location: &str,
        now: DateTime<Utc>,
    ) -> AppResult<DutyStatusEntry> {
        if let Some(last) = self.entries.last_mut() {
            if !last.is_open() {
                return Err(AppError::CorruptLog(format!(
                    "driver '{}' has no open entry to close",
                    self.driver_id
                )));
            }
            if now < last.start_time {
                return Err(AppError::InvalidTime(format!(
                    "status change at {} precedes the current entry start {}",
                    now.to_rfc3339(),
                    last.start_time.to_rfc3339()
                )));
            }
            last.end_time = Some(now);
        }

        let entry = DutyStatusEntry::open(&self.driver_id, status, now, location);
        self.entries.push(entry.clone());

        log::debug!(
            "driver {}: {} at {} ({})",
            self.driver_id,
            status.code(),
            now.to_rfc3339(),
            location
        );

        Ok(entry)
    }

    pub fn current_entry(&self) -> AppResult<&DutyStatusEntry> {
        current_entry(&self.driver_id, &self.entries)
    }

    pub fn current_status(&self) -> AppResult<DutyStatus> {
        Ok(self.current_entry()?.status)
    }

    /// Time spent in the current status: `now − open.start_time`.
    pub fn current_status_duration(&self, now: DateTime<Utc>) -> AppResult<Duration> {
        Ok(self.current_entry()?.duration_at(now))
    }
}
