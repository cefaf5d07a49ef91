use crate::cli::commands::open_tracker;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::rule_set::RuleSet;
use crate::models::summary::HosSummary;
use crate::models::violation::Violation;
use crate::ui::messages::{alert, header, success};
use crate::utils::colors::{RESET, color_for_remaining};
use crate::utils::{describe_status, mins2readable};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { driver, json } = cmd {
        let mut tracker = open_tracker(cfg)?;
        let summary = tracker.summary(driver)?;

        if *json {
            let out = serde_json::to_string_pretty(&summary)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
        } else {
            print_summary(&summary, tracker.rules());
        }
    }
    Ok(())
}

fn budget_line(label: &str, used: i64, left: i64, limit: i64) {
    println!(
        "{:<9}: {} used | {}{} left{} (limit {})",
        label,
        mins2readable(used, false, false),
        color_for_remaining(left),
        mins2readable(left, false, false),
        RESET,
        mins2readable(limit, false, false)
    );
}

/// Status block shared by `status` and `watch`.
pub(crate) fn print_summary(summary: &HosSummary, rules: &RuleSet) {
    let (label, color) = describe_status(summary.current.status);

    header(format!("Driver {}", summary.driver_id));
    println!(
        "Status   : {}{} ({}){} since {} [{}]",
        color,
        label,
        summary.current.status.code(),
        RESET,
        summary.current.start_time.to_rfc3339(),
        mins2readable(summary.current_duration_minutes, false, false)
    );
    println!("Location : {}", summary.current.location);

    let acc = &summary.accumulator;
    let left = &summary.remaining;
    budget_line(
        "Driving",
        acc.driving_minutes,
        left.driving,
        rules.driving_limit_minutes,
    );
    budget_line(
        "On duty",
        acc.on_duty_minutes,
        left.on_duty,
        rules.on_duty_limit_minutes,
    );
    budget_line(
        "Cycle",
        acc.cycle_minutes,
        left.cycle,
        rules.cycle_limit_minutes(),
    );
    println!(
        "Rules    : {} ({:.1}h of {}h in {} days)",
        rules.kind.as_str(),
        acc.cycle_hours(),
        rules.cycle_limit_hours,
        rules.cycle_window_days
    );
    println!(
        "Can drive: {}",
        mins2readable(left.available_driving(), false, false)
    );

    if summary.is_compliant() {
        success("Compliant");
    } else {
        print_violations(&summary.violations);
    }
}

pub(crate) fn print_violations(violations: &[Violation]) {
    for v in violations {
        alert(format!(
            "{}: +{} over {} ({})",
            v.kind,
            mins2readable(v.overage_minutes, false, false),
            mins2readable(v.limit_minutes, false, false),
            v.rule_reference
        ));
    }
}
