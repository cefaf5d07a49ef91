use crate::cli::commands::{open_pool, open_tracker};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit_or_warn;
use crate::db::queries::list_drivers;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

/// Handle `register`: onboard a driver with an open OFF entry.
pub fn handle_register(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Register {
        driver,
        name,
        location,
    } = cmd
    {
        let mut tracker = open_tracker(cfg)?;
        let name = name.as_deref().unwrap_or(driver);
        let location = location.as_deref().unwrap_or(&cfg.default_location);

        let entry = tracker.register_driver(driver, name, location)?;

        success(format!(
            "Driver {} registered, {} since {}",
            driver,
            entry.status.label(),
            entry.start_time.to_rfc3339()
        ));
        audit_or_warn(
            &tracker.store_mut().pool.conn,
            "register",
            driver,
            &format!("Driver '{}' onboarded at {}", name, location),
        );
    }
    Ok(())
}

/// Handle `drivers`: list registered drivers.
pub fn handle_list(cfg: &Config) -> AppResult<()> {
    let pool = open_pool(cfg)?;
    let drivers = list_drivers(&pool.conn)?;

    if drivers.is_empty() {
        info("No drivers registered. Use `rhoslog register <ID>` first.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::new("ID", 10),
        Column::new("NAME", 24),
    ]);
    for (id, name) in drivers {
        table.add_row(vec![id, name]);
    }
    print!("{}", table.render());
    Ok(())
}
