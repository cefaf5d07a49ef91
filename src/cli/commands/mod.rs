pub mod audit;
pub mod change;
pub mod config;
pub mod daylog;
pub mod db;
pub mod driver;
pub mod export;
pub mod history;
pub mod init;
pub mod status;
pub mod watch;

use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::tracker::HosTracker;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::store::SqliteLogStore;
use crate::errors::AppResult;

/// Tracker backed by the configured SQLite database.
pub type CliTracker = HosTracker<SqliteLogStore<SystemClock>, SystemClock>;

pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::with_busy_timeout(&cfg.database, cfg.busy_timeout_ms)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

pub(crate) fn open_tracker(cfg: &Config) -> AppResult<CliTracker> {
    let pool = open_pool(cfg)?;
    let store = SqliteLogStore::new(pool, SystemClock).with_source("cli");
    Ok(HosTracker::with_options(
        store,
        SystemClock,
        cfg.rule_set()?,
        cfg.tracker_options()?,
    ))
}
