use serde::{Deserialize, Serialize};
use std::fmt;

/// Duty status of a driver. Exactly one is active at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DutyStatus {
    OffDuty,      // OFF
    OnDuty,       // ON
    Driving,      // D
    SleeperBerth, // SB
}

impl DutyStatus {
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::SleeperBerth,
        DutyStatus::Driving,
        DutyStatus::OnDuty,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "OFF",
            DutyStatus::OnDuty => "ON",
            DutyStatus::Driving => "D",
            DutyStatus::SleeperBerth => "SB",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "Off duty",
            DutyStatus::OnDuty => "On duty (not driving)",
            DutyStatus::Driving => "Driving",
            DutyStatus::SleeperBerth => "Sleeper berth",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.code()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "OFF" => Some(DutyStatus::OffDuty),
            "ON" => Some(DutyStatus::OnDuty),
            "D" => Some(DutyStatus::Driving),
            "SB" => Some(DutyStatus::SleeperBerth),
            _ => None,
        }
    }

    /// Parse user input: codes or names, case-insensitive.
    pub fn from_code(input: &str) -> Option<Self> {
        let norm = input.trim().to_lowercase().replace(['_', ' '], "-");
        match norm.as_str() {
            "off" | "off-duty" | "offduty" => Some(DutyStatus::OffDuty),
            "on" | "on-duty" | "onduty" => Some(DutyStatus::OnDuty),
            "d" | "drive" | "driving" => Some(DutyStatus::Driving),
            "sb" | "sleeper" | "sleeper-berth" | "sleeperberth" => Some(DutyStatus::SleeperBerth),
            _ => None,
        }
    }

    /// On-duty time counts against the on-duty window and the cycle.
    pub fn is_on_duty(&self) -> bool {
        matches!(self, DutyStatus::OnDuty | DutyStatus::Driving)
    }

    /// Off-duty and sleeper-berth time both count toward a rest break.
    pub fn is_rest(&self) -> bool {
        !self.is_on_duty()
    }

    pub fn is_driving(&self) -> bool {
        matches!(self, DutyStatus::Driving)
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_codes_are_reversible() {
        for s in DutyStatus::ALL {
            assert_eq!(DutyStatus::from_db_str(s.to_db_str()), Some(s));
        }
    }

    #[test]
    fn user_input_accepts_codes_and_names() {
        assert_eq!(DutyStatus::from_code("SB"), Some(DutyStatus::SleeperBerth));
        assert_eq!(DutyStatus::from_code("off_duty"), Some(DutyStatus::OffDuty));
        assert_eq!(DutyStatus::from_code("On Duty"), Some(DutyStatus::OnDuty));
        assert_eq!(DutyStatus::from_code("driving"), Some(DutyStatus::Driving));
        assert_eq!(DutyStatus::from_code("lunch"), None);
    }

    #[test]
    fn rest_and_on_duty_partition_statuses() {
        for s in DutyStatus::ALL {
            assert_ne!(s.is_rest(), s.is_on_duty());
        }
        assert!(DutyStatus::Driving.is_on_duty());
        assert!(DutyStatus::SleeperBerth.is_rest());
    }
}
