use crate::cli::commands::open_tracker;
use crate::cli::commands::status::print_violations;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit_or_warn;
use crate::errors::{AppError, AppResult};
use crate::models::duty_status::DutyStatus;
use crate::ui::messages::success;

/// Handle `change`: close the open entry and open one with the new status.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Change {
        driver,
        status,
        location,
    } = cmd
    {
        let status = DutyStatus::from_code(status).ok_or_else(|| {
            AppError::InvalidStatus(format!(
                "'{}' (expected OFF, SB, D or ON)",
                status
            ))
        })?;
        let location = location.as_deref().unwrap_or(&cfg.default_location);

        let mut tracker = open_tracker(cfg)?;
        let transition = tracker.change_status(driver, status, location)?;
        let (previous, entry) = (transition.previous.status, transition.entry);

        success(format!(
            "Driver {}: {} → {} at {} ({})",
            driver,
            previous.code(),
            entry.status.code(),
            entry.start_time.to_rfc3339(),
            entry.location
        ));

        audit_or_warn(
            &tracker.store_mut().pool.conn,
            "change",
            driver,
            &format!("{} -> {} at {}", previous.code(), entry.status.code(), location),
        );

        // Changing status never blocks, but the driver should see a breach at once.
        let summary = tracker.summary(driver)?;
        print_violations(&summary.violations);
    }
    Ok(())
}
