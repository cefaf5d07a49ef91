use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::fs;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", cfg.to_yaml()?);
        }

        if *check {
            let mut problems = cfg.check();

            // Keys that serde silently defaulted are reported so the file can be completed.
            let path = Config::config_file();
            if let Ok(raw) = fs::read_to_string(&path) {
                for key in Config::missing_keys(&raw)? {
                    problems.push(format!("missing key '{}' in {}", key, path.display()));
                }
            }

            if problems.is_empty() {
                success("Configuration is valid.");
            } else {
                for p in &problems {
                    warning(p);
                }
            }
        }
    }

    Ok(())
}
