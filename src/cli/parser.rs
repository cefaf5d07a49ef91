use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rHOSlog
/// CLI application to track driver duty status and Hours-of-Service with SQLite
#[derive(Parser)]
#[command(
    name = "rhoslog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Hours-of-Service tracker: log duty status changes and check driving, on-duty and cycle limits",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or validate the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration values and missing fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Onboard a driver (opens the log with an OFF duty entry)
    Register {
        /// Driver identifier
        driver: String,

        #[arg(long, help = "Driver display name")]
        name: Option<String>,

        #[arg(long, short = 'l', help = "Location of the opening entry")]
        location: Option<String>,
    },

    /// List registered drivers
    Drivers,

    /// Change the duty status of a driver
    Change {
        /// Driver identifier
        driver: String,

        /// New status: OFF, SB, D, ON (or off-duty, sleeper, driving, on-duty)
        status: String,

        #[arg(long, short = 'l', help = "Location of the change")]
        location: Option<String>,
    },

    /// Show current status, time budgets and violations
    Status {
        /// Driver identifier
        driver: String,

        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },

    /// List the duty status entries of a driver
    History {
        /// Driver identifier
        driver: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range (FROM:TO)"
        )]
        range: Option<String>,
    },

    /// Show the chronological log of one day
    Daylog {
        /// Driver identifier
        driver: String,

        #[arg(long, help = "Day to show (YYYY-MM-DD, default: today)")]
        date: Option<String>,
    },

    /// Refresh the status display periodically
    Watch {
        /// Driver identifier
        driver: String,

        #[arg(long, help = "Seconds between refreshes (default from config)")]
        interval: Option<u64>,

        #[arg(long, help = "Stop after this many refreshes")]
        ticks: Option<u32>,
    },

    /// Export the duty log
    Export {
        /// Driver identifier
        driver: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, help = "Export daily-log segments instead of entries")]
        daylog: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal audit log
    Audit {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
