use super::{
    accumulator::{HosAccumulator, Remaining},
    entry::DutyStatusEntry,
    violation::Violation,
};
use serde::Serialize;

/// Everything the status display needs for one driver at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct HosSummary {
    pub driver_id: String,
    pub current: DutyStatusEntry,
    pub current_duration_minutes: i64,
    pub accumulator: HosAccumulator,
    pub remaining: Remaining,
    pub violations: Vec<Violation>,
}

impl HosSummary {
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }
}
