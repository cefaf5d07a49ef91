use crate::models::accumulator::HosAccumulator;
use crate::models::rule_set::RuleSet;
use crate::models::violation::{Violation, ViolationKind};

/// Compare every budget with its limit.
///
/// Being exactly at a limit is compliant: only a value strictly above the
/// limit yields a violation. `detected_at` is the accumulator's `as_of`.
pub fn detect_violations(acc: &HosAccumulator, rules: &RuleSet) -> Vec<Violation> {
    let checks = [
        (
            ViolationKind::DrivingLimitExceeded,
            acc.driving_minutes,
            rules.driving_limit_minutes,
            rules.driving_reference(),
        ),
        (
            ViolationKind::OnDutyLimitExceeded,
            acc.on_duty_minutes,
            rules.on_duty_limit_minutes,
            rules.on_duty_reference(),
        ),
        (
            ViolationKind::CycleLimitExceeded,
            acc.cycle_minutes,
            rules.cycle_limit_minutes(),
            rules.cycle_reference(),
        ),
    ];

    checks
        .into_iter()
        .filter(|(_, actual, limit, _)| actual > limit)
        .map(|(kind, actual, limit, reference)| Violation {
            kind,
            detected_at: acc.as_of,
            rule_reference: reference.to_string(),
            limit_minutes: limit,
            actual_minutes: actual,
            overage_minutes: actual - limit,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::accumulator::compute_accumulators;
    use crate::core::calculator::fixtures::{log_from, t0};
    use crate::models::duty_status::DutyStatus::*;
    use chrono::Duration;

    #[test]
    fn no_violation_while_off_duty() {
        let (entries, now) = log_from(t0(), &[(OffDuty, 120)]);
        let rules = RuleSet::us_70_hour();
        let acc = compute_accumulators(&entries, now, &rules).unwrap();
        assert!(detect_violations(&acc, &rules).is_empty());
    }

    #[test]
    fn driving_exactly_at_limit_is_compliant() {
        let (entries, now) = log_from(
            t0(),
            &[(OffDuty, 660), (Driving, 330), (OnDuty, 30), (Driving, 330), (OffDuty, 10)],
        );
        let rules = RuleSet::us_70_hour();
        let acc = compute_accumulators(&entries, now, &rules).unwrap();
        assert_eq!(acc.driving_minutes, 660);
        assert!(detect_violations(&acc, &rules).is_empty());
    }

    #[test]
    fn one_minute_over_driving_limit() {
        let (entries, now) = log_from(t0(), &[(OffDuty, 660), (Driving, 660)]);
        let rules = RuleSet::us_70_hour();
        let acc = compute_accumulators(&entries, now + Duration::minutes(1), &rules).unwrap();

        let v = detect_violations(&acc, &rules);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].kind, ViolationKind::DrivingLimitExceeded);
        assert_eq!(v[0].overage_minutes, 1);
        assert_eq!(v[0].limit_minutes, 660);
        assert_eq!(v[0].rule_reference, "49 CFR 395.3(a)(3)");
        assert_eq!(v[0].detected_at, acc.as_of);
    }

    #[test]
    fn violations_clear_after_qualifying_break() {
        let (entries, now) = log_from(t0(), &[(OffDuty, 600), (Driving, 700), (OffDuty, 0)]);
        let rules = RuleSet::us_70_hour();

        let acc = compute_accumulators(&entries, now + Duration::minutes(60), &rules).unwrap();
        assert_eq!(detect_violations(&acc, &rules).len(), 1);

        let acc = compute_accumulators(&entries, now + Duration::minutes(600), &rules).unwrap();
        assert!(detect_violations(&acc, &rules).is_empty());
    }

    #[test]
    fn every_limit_can_be_exceeded_at_once() {
        let rules = RuleSet::us_70_hour();
        let acc = HosAccumulator {
            driving_minutes: 700,
            on_duty_minutes: 900,
            cycle_minutes: 4300,
            as_of: t0(),
        };
        let kinds: Vec<_> = detect_violations(&acc, &rules)
            .into_iter()
            .map(|v| (v.kind, v.overage_minutes))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (ViolationKind::DrivingLimitExceeded, 40),
                (ViolationKind::OnDutyLimitExceeded, 60),
                (ViolationKind::CycleLimitExceeded, 100),
            ]
        );
    }
}
