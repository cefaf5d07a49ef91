//! Duty Status Log Store boundary.
//!
//! The store owns the log. Callers always work on a freshly fetched copy and
//! submit status changes with the id of the open entry they observed; a
//! store rejects the change with `StaleWrite` when that entry is no longer
//! the open one.

use crate::core::clock::Clock;
use crate::core::status::DutyLog;
use crate::errors::{AppError, AppResult};
use crate::models::duty_status::DutyStatus;
use crate::models::entry::DutyStatusEntry;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A status change request as submitted to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub driver_id: String,
    pub status: DutyStatus,
    pub location: String,
    /// Advisory only: the store assigns the authoritative start time.
    pub client_timestamp: DateTime<Utc>,
    /// Id of the open entry the caller saw when it fetched the log.
    pub expected_open_id: Option<i64>,
}

pub trait DutyLogStore {
    /// Onboard a driver with its opening `OffDuty` entry.
    fn register_driver(
        &mut self,
        driver_id: &str,
        name: &str,
        location: &str,
    ) -> AppResult<DutyStatusEntry>;

    /// Full log of one driver, oldest-first.
    fn fetch_entries(&mut self, driver_id: &str) -> AppResult<Vec<DutyStatusEntry>>;

    /// Close the open entry and append the new one atomically.
    fn append_status_change(&mut self, change: &StatusChange) -> AppResult<DutyStatusEntry>;
}

/// Check the caller's view of the open entry against the stored one.
pub(crate) fn check_expected_open(log: &DutyLog, change: &StatusChange) -> AppResult<()> {
    let actual = log.open_entry().map(|e| e.id);
    if actual != change.expected_open_id {
        return Err(AppError::StaleWrite {
            driver_id: change.driver_id.clone(),
            reason: format!(
                "expected open entry {:?}, found {:?}",
                change.expected_open_id, actual
            ),
        });
    }
    Ok(())
}

/// In-memory store, mostly for tests.
pub struct MemoryLogStore<C: Clock> {
    clock: C,
    drivers: HashMap<String, String>,
    logs: HashMap<String, Vec<DutyStatusEntry>>,
    next_id: i64,
    failing_fetches: usize,
}

impl<C: Clock> MemoryLogStore<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            drivers: HashMap::new(),
            logs: HashMap::new(),
            next_id: 1,
            failing_fetches: 0,
        }
    }

    /// Make the next `count` fetches fail with `TransientFetch`.
    pub fn fail_next_fetches(&mut self, count: usize) {
        self.failing_fetches = count;
    }
}

impl<C: Clock> DutyLogStore for MemoryLogStore<C> {
    fn register_driver(
        &mut self,
        driver_id: &str,
        name: &str,
        location: &str,
    ) -> AppResult<DutyStatusEntry> {
        if self.drivers.contains_key(driver_id) {
            return Err(AppError::DriverExists(driver_id.to_string()));
        }

        let mut log = DutyLog::new(driver_id);
        let mut entry = log.change_status(DutyStatus::OffDuty, location, self.clock.now())?;
        entry.id = self.next_id;
        self.next_id += 1;

        self.drivers.insert(driver_id.to_string(), name.to_string());
        self.logs.insert(driver_id.to_string(), vec![entry.clone()]);
        Ok(entry)
    }

    fn fetch_entries(&mut self, driver_id: &str) -> AppResult<Vec<DutyStatusEntry>> {
        if self.failing_fetches > 0 {
            self.failing_fetches -= 1;
            return Err(AppError::TransientFetch("memory store unavailable".into()));
        }
        Ok(self.logs.get(driver_id).cloned().unwrap_or_default())
    }

    fn append_status_change(&mut self, change: &StatusChange) -> AppResult<DutyStatusEntry> {
        let stored = self
            .logs
            .get(&change.driver_id)
            .filter(|l| !l.is_empty())
            .cloned()
            .ok_or_else(|| AppError::NoActiveLog(change.driver_id.clone()))?;

        let mut log = DutyLog::from_entries(&change.driver_id, stored)?;
        check_expected_open(&log, change)?;

        log.change_status(change.status, &change.location, self.clock.now())?;

        let mut entries = log.into_entries();
        if let Some(last) = entries.last_mut() {
            last.id = self.next_id;
            self.next_id += 1;
        }
        let appended = entries
            .last()
            .cloned()
            .ok_or_else(|| AppError::Other("append produced no entry".into()))?;

        self.logs.insert(change.driver_id.clone(), entries);
        Ok(appended)
    }
}
