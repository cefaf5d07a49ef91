use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationKind {
    #[serde(rename = "driving-limit-exceeded")]
    DrivingLimitExceeded,
    #[serde(rename = "on-duty-limit-exceeded")]
    OnDutyLimitExceeded,
    #[serde(rename = "cycle-limit-exceeded")]
    CycleLimitExceeded,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::DrivingLimitExceeded => "driving-limit-exceeded",
            ViolationKind::OnDutyLimitExceeded => "on-duty-limit-exceeded",
            ViolationKind::CycleLimitExceeded => "cycle-limit-exceeded",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A limit breach derived from the current log. Not stored, not acknowledged:
/// it disappears as soon as the log no longer supports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub detected_at: DateTime<Utc>,
    pub rule_reference: String,
    pub limit_minutes: i64,
    pub actual_minutes: i64,
    pub overage_minutes: i64,
}
