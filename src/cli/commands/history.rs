use crate::cli::commands::open_tracker;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::colors::{GREY, RESET};
use crate::utils::date::parse_range;
use crate::utils::table::{Column, Table};
use crate::utils::{describe_status, mins2readable};

/// Handle `history`: the raw entry log of one driver.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { driver, range } = cmd {
        let bounds = range.as_deref().map(parse_range).transpose()?;

        let mut tracker = open_tracker(cfg)?;
        let now = tracker.now();
        let offset = tracker.options().home_offset;
        let entries = tracker.fetch(driver)?;
        if entries.is_empty() {
            return Err(AppError::NoActiveLog(driver.clone()));
        }

        let mut table = Table::new(vec![
            Column::new("ID", 5),
            Column::new("STATUS", 16),
            Column::new("START", 19),
            Column::new("END", 19),
            Column::new("DURATION", 8),
            Column::new("LOCATION", 16),
        ]);

        let mut shown = 0;
        for e in &entries {
            let start = e.start_time.with_timezone(&offset);
            if let Some((from, to)) = bounds
                && (start.date_naive() < from || start.date_naive() > to)
            {
                continue;
            }

            let (label, color) = describe_status(e.status);
            let end = match e.end_time {
                Some(t) => t.with_timezone(&offset).format("%Y-%m-%d %H:%M:%S").to_string(),
                None => format!("{}(open){}", GREY, RESET),
            };

            // The label is padded before colouring so ANSI codes don't skew the columns.
            table.add_row(vec![
                e.id.to_string(),
                format!("{}{:<16}{}", color, label, RESET),
                start.format("%Y-%m-%d %H:%M:%S").to_string(),
                end,
                mins2readable(e.minutes_at(now), false, true),
                e.location.clone(),
            ]);
            shown += 1;
        }

        if shown == 0 {
            info("No entries in the selected range.");
            return Ok(());
        }

        println!("📋 Duty log for driver {}:\n", driver);
        print!("{}", table.render());
    }
    Ok(())
}
