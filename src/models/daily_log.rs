use super::duty_status::DutyStatus;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Portion of a duty status entry that falls inside one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySegment {
    pub entry_id: i64,
    pub status: DutyStatus,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub minutes: i64,
    pub location: String,
    pub ongoing: bool,
}

/// Chronological record of duty status for one day (home-terminal time).
#[derive(Debug, Clone, Default, Serialize)]
pub struct DailyLog {
    pub day: Option<NaiveDate>,
    pub segments: Vec<DaySegment>,
    pub totals: BTreeMap<String, i64>,
}

impl DailyLog {
    pub fn total_for(&self, status: DutyStatus) -> i64 {
        self.totals.get(status.code()).copied().unwrap_or(0)
    }

    pub fn total_minutes(&self) -> i64 {
        self.totals.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
