use crate::cli::commands::open_tracker;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::{ExportLogic, ExportRequest};
use crate::db::log::audit_or_warn;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        driver,
        format,
        file,
        range,
        daylog,
        force,
    } = cmd
    {
        let mut tracker = open_tracker(cfg)?;
        let req = ExportRequest {
            driver_id: driver,
            format: *format,
            file,
            range: range.as_deref(),
            daylog: *daylog,
            force: *force,
        };

        let rows = ExportLogic::export(&mut tracker, &req)?;

        if rows > 0 {
            audit_or_warn(
                &tracker.store_mut().pool.conn,
                "export",
                driver,
                &format!("{} rows ({}) to {}", rows, format.as_str(), file),
            );
        }
    }
    Ok(())
}
