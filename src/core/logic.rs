use crate::core::calculator::{accumulator, violations};
use crate::core::status::{current_entry, validate_log};
use crate::errors::AppResult;
use crate::models::entry::DutyStatusEntry;
use crate::models::rule_set::RuleSet;
use crate::models::summary::HosSummary;
use chrono::{DateTime, Utc};

pub struct Core;

impl Core {
    /// Derive the full HOS picture of one driver from its log at `now`.
    pub fn build_summary(
        driver_id: &str,
        entries: &[DutyStatusEntry],
        now: DateTime<Utc>,
        rules: &RuleSet,
    ) -> AppResult<HosSummary> {
        validate_log(entries)?;
        let current = current_entry(driver_id, entries)?.clone();

        let acc = accumulator::compute_accumulators(entries, now, rules)?;
        let remaining = accumulator::remaining_minutes(&acc, rules);
        let found = violations::detect_violations(&acc, rules);

        Ok(HosSummary {
            driver_id: driver_id.to_string(),
            current_duration_minutes: current.minutes_at(now),
            current,
            accumulator: acc,
            remaining,
            violations: found,
        })
    }
}
