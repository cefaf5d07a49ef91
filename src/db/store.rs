//! SQLite-backed Duty Status Log Store.

use crate::core::clock::Clock;
use crate::core::status::DutyLog;
use crate::core::store::{DutyLogStore, StatusChange, check_expected_open};
use crate::db::pool::DbPool;
use crate::db::{classify, queries, reclassify};
use crate::errors::{AppError, AppResult};
use crate::models::duty_status::DutyStatus;
use crate::models::entry::DutyStatusEntry;
use rusqlite::TransactionBehavior;

pub struct SqliteLogStore<C: Clock> {
    pub pool: DbPool,
    clock: C,
    source: String,
}

impl<C: Clock> SqliteLogStore<C> {
    pub fn new(pool: DbPool, clock: C) -> Self {
        Self {
            pool,
            clock,
            source: "cli".to_string(),
        }
    }

    /// Tag stored entries with their origin (`cli`, `import`, ...).
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }
}

impl<C: Clock> DutyLogStore for SqliteLogStore<C> {
    fn register_driver(
        &mut self,
        driver_id: &str,
        name: &str,
        location: &str,
    ) -> AppResult<DutyStatusEntry> {
        let now = self.clock.now();
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(classify)?;

        if queries::driver_exists(&tx, driver_id).map_err(reclassify)? {
            return Err(AppError::DriverExists(driver_id.to_string()));
        }
        queries::insert_driver(&tx, driver_id, name).map_err(reclassify)?;

        let mut log = DutyLog::new(driver_id);
        let mut entry = log.change_status(DutyStatus::OffDuty, location, now)?;
        entry.id = queries::insert_entry(&tx, &entry, &self.source).map_err(reclassify)?;

        tx.commit().map_err(classify)?;
        Ok(entry)
    }

    fn fetch_entries(&mut self, driver_id: &str) -> AppResult<Vec<DutyStatusEntry>> {
        queries::load_entries(&self.pool.conn, driver_id).map_err(reclassify)
    }

    fn append_status_change(&mut self, change: &StatusChange) -> AppResult<DutyStatusEntry> {
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(classify)?;

        let stored = queries::load_entries(&tx, &change.driver_id).map_err(reclassify)?;
        if stored.is_empty() {
            return Err(AppError::NoActiveLog(change.driver_id.clone()));
        }

        let mut log = DutyLog::from_entries(&change.driver_id, stored)?;
        check_expected_open(&log, change)?;
        let open_id = log.open_entry().map(|e| e.id);

        // the store's clock is authoritative; the client timestamp is advisory
        let now = self.clock.now();
        if (change.client_timestamp - now).num_seconds().abs() > 300 {
            ::log::warn!(
                "client clock for driver {} is off by {}s",
                change.driver_id,
                (change.client_timestamp - now).num_seconds()
            );
        }

        let mut entry = log.change_status(change.status, &change.location, now)?;

        if let Some(id) = open_id
            && queries::close_entry(&tx, id, &now).map_err(reclassify)? == 0
        {
            return Err(AppError::StaleWrite {
                driver_id: change.driver_id.clone(),
                reason: format!("entry {} was closed by another writer", id),
            });
        }
        entry.id = queries::insert_entry(&tx, &entry, &self.source).map_err(reclassify)?;

        tx.commit().map_err(classify)?;
        Ok(entry)
    }
}
