use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named regulatory rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleSetKind {
    #[serde(rename = "US_70_HOUR")]
    Us70Hour,
    #[serde(rename = "US_60_HOUR")]
    Us60Hour,
    #[serde(rename = "CANADA_70_HOUR")]
    Canada70Hour,
    #[serde(rename = "CUSTOM")]
    Custom,
}

impl RuleSetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSetKind::Us70Hour => "US_70_HOUR",
            RuleSetKind::Us60Hour => "US_60_HOUR",
            RuleSetKind::Canada70Hour => "CANADA_70_HOUR",
            RuleSetKind::Custom => "CUSTOM",
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "US_70_HOUR" | "US70" => Ok(RuleSetKind::Us70Hour),
            "US_60_HOUR" | "US60" => Ok(RuleSetKind::Us60Hour),
            "CANADA_70_HOUR" | "CA70" => Ok(RuleSetKind::Canada70Hour),
            "CUSTOM" => Ok(RuleSetKind::Custom),
            other => Err(AppError::InvalidRuleSet(format!(
                "unknown rule set '{}' (expected US_70_HOUR, US_60_HOUR, CANADA_70_HOUR or CUSTOM)",
                other
            ))),
        }
    }
}

impl fmt::Display for RuleSetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Limits used by the accumulator and the violation detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub kind: RuleSetKind,
    pub driving_limit_minutes: i64,
    pub on_duty_limit_minutes: i64,
    pub cycle_limit_hours: i64,
    pub cycle_window_days: i64,
    pub qualifying_break_minutes: i64,
}

/// Longest rolling cycle accepted for a rule set.
pub const MAX_CYCLE_WINDOW_DAYS: i64 = 366;
/// Per-shift limits and the qualifying break fit within one week.
pub const MAX_SHIFT_MINUTES: i64 = 7 * 24 * 60;

impl RuleSet {
    /// FMCSA property-carrying, 70 hours in 8 days.
    pub fn us_70_hour() -> Self {
        Self {
            kind: RuleSetKind::Us70Hour,
            driving_limit_minutes: 11 * 60,
            on_duty_limit_minutes: 14 * 60,
            cycle_limit_hours: 70,
            cycle_window_days: 8,
            qualifying_break_minutes: 10 * 60,
        }
    }

    /// FMCSA property-carrying, 60 hours in 7 days.
    pub fn us_60_hour() -> Self {
        Self {
            kind: RuleSetKind::Us60Hour,
            cycle_limit_hours: 60,
            cycle_window_days: 7,
            ..Self::us_70_hour()
        }
    }

    /// Canadian south-of-60 cycle 1.
    pub fn canada_70_hour() -> Self {
        Self {
            kind: RuleSetKind::Canada70Hour,
            driving_limit_minutes: 13 * 60,
            on_duty_limit_minutes: 14 * 60,
            cycle_limit_hours: 70,
            cycle_window_days: 7,
            qualifying_break_minutes: 8 * 60,
        }
    }

    pub fn preset(kind: RuleSetKind) -> Self {
        match kind {
            RuleSetKind::Us70Hour => Self::us_70_hour(),
            RuleSetKind::Us60Hour => Self::us_60_hour(),
            RuleSetKind::Canada70Hour => Self::canada_70_hour(),
            RuleSetKind::Custom => Self {
                kind: RuleSetKind::Custom,
                ..Self::us_70_hour()
            },
        }
    }

    pub fn cycle_limit_minutes(&self) -> i64 {
        self.cycle_limit_hours * 60
    }

    /// Regulatory citation for the driving limit.
    pub fn driving_reference(&self) -> &'static str {
        match self.kind {
            RuleSetKind::Canada70Hour => "SOR/2005-313 s.12(1)",
            RuleSetKind::Custom => "custom driving limit",
            _ => "49 CFR 395.3(a)(3)",
        }
    }

    pub fn on_duty_reference(&self) -> &'static str {
        match self.kind {
            RuleSetKind::Canada70Hour => "SOR/2005-313 s.13(1)",
            RuleSetKind::Custom => "custom on-duty window",
            _ => "49 CFR 395.3(a)(2)",
        }
    }

    pub fn cycle_reference(&self) -> &'static str {
        match self.kind {
            RuleSetKind::Us70Hour => "49 CFR 395.3(b)(2)",
            RuleSetKind::Us60Hour => "49 CFR 395.3(b)(1)",
            RuleSetKind::Canada70Hour => "SOR/2005-313 s.26",
            RuleSetKind::Custom => "custom cycle limit",
        }
    }

    /// Reject limits that would make the accounting meaningless.
    pub fn validate(&self) -> AppResult<()> {
        let checks = [
            ("driving_limit_minutes", self.driving_limit_minutes, MAX_SHIFT_MINUTES),
            ("on_duty_limit_minutes", self.on_duty_limit_minutes, MAX_SHIFT_MINUTES),
            ("cycle_limit_hours", self.cycle_limit_hours, MAX_CYCLE_WINDOW_DAYS * 24),
            ("cycle_window_days", self.cycle_window_days, MAX_CYCLE_WINDOW_DAYS),
            ("qualifying_break_minutes", self.qualifying_break_minutes, MAX_SHIFT_MINUTES),
        ];
        for (name, value, max) in checks {
            if value <= 0 {
                return Err(AppError::InvalidRuleSet(format!(
                    "{} must be positive (got {})",
                    name, value
                )));
            }
            if value > max {
                return Err(AppError::InvalidRuleSet(format!(
                    "{} must be at most {} (got {})",
                    name, max, value
                )));
            }
        }
        if self.driving_limit_minutes > self.on_duty_limit_minutes {
            return Err(AppError::InvalidRuleSet(format!(
                "driving limit ({} min) cannot exceed on-duty limit ({} min)",
                self.driving_limit_minutes, self.on_duty_limit_minutes
            )));
        }
        Ok(())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::us_70_hour()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_their_kind() {
        for kind in [
            RuleSetKind::Us70Hour,
            RuleSetKind::Us60Hour,
            RuleSetKind::Canada70Hour,
        ] {
            let rs = RuleSet::preset(kind);
            assert_eq!(rs.kind, kind);
            rs.validate().unwrap();
        }
        assert_eq!(RuleSet::us_60_hour().cycle_window_days, 7);
        assert_eq!(RuleSet::us_70_hour().cycle_limit_minutes(), 4200);
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(RuleSetKind::parse("us-70-hour").unwrap(), RuleSetKind::Us70Hour);
        assert_eq!(RuleSetKind::parse("US60").unwrap(), RuleSetKind::Us60Hour);
        assert!(RuleSetKind::parse("EU_561").is_err());
    }

    #[test]
    fn validate_rejects_driving_above_on_duty() {
        let rs = RuleSet {
            driving_limit_minutes: 900,
            ..RuleSet::us_70_hour()
        };
        assert!(matches!(rs.validate(), Err(AppError::InvalidRuleSet(_))));
    }

    #[test]
    fn validate_rejects_out_of_range_windows_and_limits() {
        let huge_window = RuleSet {
            cycle_window_days: 200_000_000,
            ..RuleSet::preset(RuleSetKind::Custom)
        };
        assert!(matches!(huge_window.validate(), Err(AppError::InvalidRuleSet(_))));

        let huge_cycle = RuleSet {
            cycle_limit_hours: i64::MAX / 2,
            ..RuleSet::preset(RuleSetKind::Custom)
        };
        assert!(matches!(huge_cycle.validate(), Err(AppError::InvalidRuleSet(_))));

        let year = RuleSet {
            cycle_window_days: MAX_CYCLE_WINDOW_DAYS,
            cycle_limit_hours: MAX_CYCLE_WINDOW_DAYS * 24,
            ..RuleSet::preset(RuleSetKind::Custom)
        };
        year.validate().unwrap();
    }
}
