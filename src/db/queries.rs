use crate::errors::{AppError, AppResult};
use crate::models::duty_status::DutyStatus;
use crate::models::entry::DutyStatusEntry;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Fixed-width RFC3339 (UTC, milliseconds) so stored timestamps sort as text.
pub fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_ts(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<DutyStatusEntry> {
    let status_str: String = row.get("status")?;
    let status = DutyStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(2, AppError::InvalidStatus(status_str.clone())))?;

    let start_str: String = row.get("start_time")?;
    let start_time =
        parse_ts(&start_str).ok_or_else(|| conversion_error(3, AppError::InvalidTime(start_str.clone())))?;

    let end_str: Option<String> = row.get("end_time")?;
    let end_time = match end_str {
        Some(s) => Some(parse_ts(&s).ok_or_else(|| conversion_error(4, AppError::InvalidTime(s.clone())))?),
        None => None,
    };

    Ok(DutyStatusEntry {
        id: row.get("id")?,
        driver_id: row.get("driver_id")?,
        status,
        start_time,
        end_time,
        location: row.get("location")?,
    })
}

/// All entries of a driver, oldest-first (append order).
pub fn load_entries(conn: &Connection, driver_id: &str) -> AppResult<Vec<DutyStatusEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, driver_id, status, start_time, end_time, location
         FROM duty_entries
         WHERE driver_id = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([driver_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert a new entry and return its id.
pub fn insert_entry(conn: &Connection, e: &DutyStatusEntry, source: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO duty_entries (driver_id, status, start_time, end_time, location, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            e.driver_id,
            e.status.to_db_str(),
            format_ts(&e.start_time),
            e.end_time.as_ref().map(format_ts),
            e.location,
            source,
            format_ts(&Utc::now()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Close an entry only if it is still open. Returns the number of rows
/// closed (0 when another writer got there first).
pub fn close_entry(conn: &Connection, id: i64, end: &DateTime<Utc>) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE duty_entries SET end_time = ?1 WHERE id = ?2 AND end_time IS NULL",
        params![format_ts(end), id],
    )?;
    Ok(n)
}

pub fn driver_exists(conn: &Connection, driver_id: &str) -> AppResult<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM drivers WHERE id = ?1", [driver_id], |r| r.get(0))
        .optional()?;
    Ok(found.is_some())
}

pub fn insert_driver(conn: &Connection, driver_id: &str, name: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO drivers (id, name, created_at) VALUES (?1, ?2, ?3)",
        params![driver_id, name, format_ts(&Utc::now())],
    )?;
    Ok(())
}

/// `(id, name)` of every registered driver.
pub fn list_drivers(conn: &Connection) -> AppResult<Vec<(String, String)>> {
    let mut stmt = conn.prepare("SELECT id, name FROM drivers ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
