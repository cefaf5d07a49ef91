use crate::cli::commands::open_tracker;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::duty_status::DutyStatus;
use crate::ui::messages::{header, info};
use crate::utils::colors::RESET;
use crate::utils::date::parse_date;
use crate::utils::table::{Column, Table};
use crate::utils::{describe_status, mins2readable};

/// Handle `daylog`: one home-terminal day as segments plus per-status totals.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Daylog { driver, date } = cmd {
        let mut tracker = open_tracker(cfg)?;

        let day = match date {
            Some(d) => parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => tracker.home_today(),
        };

        let log = tracker.daily_log(driver, day)?;

        header(format!("Driver {} on {}", driver, day));

        if log.is_empty() {
            info("No duty activity on this day.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("FROM", 5),
            Column::new("TO", 5),
            Column::new("STATUS", 16),
            Column::new("TIME", 5),
            Column::new("LOCATION", 16),
        ]);

        for seg in &log.segments {
            let (label, color) = describe_status(seg.status);
            let to = if seg.ongoing {
                "now".to_string()
            } else {
                seg.end.format("%H:%M").to_string()
            };
            table.add_row(vec![
                seg.start.format("%H:%M").to_string(),
                to,
                format!("{}{:<16}{}", color, label, RESET),
                mins2readable(seg.minutes, false, true),
                seg.location.clone(),
            ]);
        }
        print!("{}", table.render());

        println!();
        for status in DutyStatus::ALL {
            println!(
                "{:<3} {:<16} {}",
                status.code(),
                status.label(),
                mins2readable(log.total_for(status), false, true)
            );
        }
        println!("    {:<16} {}", "Total", mins2readable(log.total_minutes(), false, true));
    }
    Ok(())
}
