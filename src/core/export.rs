use crate::core::calculator::daily_log::daily_logs;
use crate::core::clock::Clock;
use crate::core::store::DutyLogStore;
use crate::core::tracker::HosTracker;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::{EntryExport, ExportFormat, SegmentExport};
use crate::ui::messages::warning;
use crate::utils::date::parse_range;
use chrono::NaiveDate;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

/// What to export.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub driver_id: &'a str,
    pub format: ExportFormat,
    pub file: &'a str,
    /// `None`, `"all"` or `PERIOD[:PERIOD]` with `YYYY`, `YYYY-MM`, `YYYY-MM-DD`.
    pub range: Option<&'a str>,
    pub daylog: bool,
    pub force: bool,
}

impl ExportLogic {
    /// Export the entry log or the daily-log segments of one driver.
    /// Returns the number of rows written.
    pub fn export<S: DutyLogStore, C: Clock>(
        tracker: &mut HosTracker<S, C>,
        req: &ExportRequest<'_>,
    ) -> AppResult<usize> {
        let path = Path::new(req.file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {}",
                req.file
            )));
        }

        ensure_writable(path, req.force)?;

        let bounds: Option<(NaiveDate, NaiveDate)> = match req.range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let entries = tracker.fetch(req.driver_id)?;
        if entries.is_empty() {
            return Err(AppError::NoActiveLog(req.driver_id.to_string()));
        }

        let offset = tracker.options().home_offset;
        let in_bounds = |d: NaiveDate| bounds.is_none_or(|(from, to)| d >= from && d <= to);

        let written = if req.daylog {
            let (from, to) = match bounds {
                Some(b) => b,
                None => {
                    let first = entries[0].start_time.with_timezone(&offset).date_naive();
                    (first, tracker.home_today())
                }
            };

            let mut rows = Vec::new();
            for log in daily_logs(&entries, tracker.now(), &offset, from, to)? {
                let day = log.day.map(|d| d.to_string()).unwrap_or_default();
                rows.extend(
                    log.segments
                        .iter()
                        .map(|s| SegmentExport::from_segment(&day, s)),
                );
            }
            write_rows(&rows, req.format, path)?
        } else {
            let rows: Vec<EntryExport> = entries
                .iter()
                .filter(|e| in_bounds(e.start_time.with_timezone(&offset).date_naive()))
                .map(EntryExport::from)
                .collect();
            write_rows(&rows, req.format, path)?
        };

        Ok(written)
    }
}

fn write_rows<T: serde::Serialize>(rows: &[T], format: ExportFormat, path: &Path) -> AppResult<usize> {
    if rows.is_empty() {
        warning("No rows found for the selected range.");
        return Ok(0);
    }

    match format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
    }
    Ok(rows.len())
}
