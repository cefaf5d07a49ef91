use crate::cli::commands::open_tracker;
use crate::cli::commands::status::print_summary;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tracker::StatusBoard;
use crate::errors::AppResult;
use crate::ui::messages::{error, stale};
use std::thread;
use std::time::Duration;

/// Handle `watch`: refresh the status display until interrupted or `--ticks` runs out.
///
/// A failed refresh keeps the last good summary on screen marked STALE.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch {
        driver,
        interval,
        ticks,
    } = cmd
    {
        let mut tracker = open_tracker(cfg)?;
        let mut board = StatusBoard::new(driver);
        let pause = Duration::from_secs(interval.unwrap_or(cfg.refresh_interval_secs));

        let mut tick: u32 = 0;
        loop {
            tick += 1;

            match board.refresh(&mut tracker) {
                Ok(summary) => print_summary(summary, tracker.rules()),
                Err(e) => {
                    if let Some(last) = board.summary() {
                        stale(format!("showing data as of {}", last.accumulator.as_of.to_rfc3339()));
                        print_summary(last, tracker.rules());
                    }
                    error(format!("refresh failed: {}", e));
                    // Nothing good was ever shown: the driver log is unusable.
                    if !board.is_stale() && !e.is_transient() {
                        return Err(e);
                    }
                }
            }

            if ticks.is_some_and(|n| tick >= n) {
                break;
            }
            thread::sleep(pause);
            println!();
        }
    }
    Ok(())
}
