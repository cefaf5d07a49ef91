// src/export/model.rs

use crate::db::queries::format_ts;
use crate::models::daily_log::DaySegment;
use crate::models::entry::DutyStatusEntry;
use serde::Serialize;

/// Flat record of one duty status entry.
#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub id: i64,
    pub driver_id: String,
    pub status: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
}

impl From<&DutyStatusEntry> for EntryExport {
    fn from(e: &DutyStatusEntry) -> Self {
        Self {
            id: e.id,
            driver_id: e.driver_id.clone(),
            status: e.status.code().to_string(),
            start_time: format_ts(&e.start_time),
            end_time: e.end_time.as_ref().map(format_ts).unwrap_or_default(),
            location: e.location.clone(),
        }
    }
}

/// Flat record of one daily-log segment.
#[derive(Serialize, Clone, Debug)]
pub struct SegmentExport {
    pub day: String,
    pub status: String,
    pub start: String,
    pub end: String,
    pub minutes: i64,
    pub location: String,
    pub ongoing: bool,
}

impl SegmentExport {
    pub fn from_segment(day: &str, s: &DaySegment) -> Self {
        Self {
            day: day.to_string(),
            status: s.status.code().to_string(),
            start: s.start.format("%H:%M").to_string(),
            end: s.end.format("%H:%M").to_string(),
            minutes: s.minutes,
            location: s.location.clone(),
            ongoing: s.ongoing,
        }
    }
}
