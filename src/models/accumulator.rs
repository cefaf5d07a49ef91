use chrono::{DateTime, Utc};
use serde::Serialize;

/// Time budgets derived from a driver's log as of `as_of`.
/// Never persisted: recomputed on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HosAccumulator {
    pub driving_minutes: i64,
    pub on_duty_minutes: i64,
    pub cycle_minutes: i64,
    pub as_of: DateTime<Utc>,
}

impl HosAccumulator {
    pub fn zero(as_of: DateTime<Utc>) -> Self {
        Self {
            driving_minutes: 0,
            on_duty_minutes: 0,
            cycle_minutes: 0,
            as_of,
        }
    }

    /// Cycle total in hours, for display only.
    pub fn cycle_hours(&self) -> f64 {
        self.cycle_minutes as f64 / 60.0
    }
}

/// Minutes left before each limit is reached. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub driving: i64,
    pub on_duty: i64,
    pub cycle: i64,
}

impl Remaining {
    /// The binding constraint: how long the driver may still drive.
    pub fn available_driving(&self) -> i64 {
        self.driving.min(self.on_duty).min(self.cycle)
    }
}
