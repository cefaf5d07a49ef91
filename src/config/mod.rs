use crate::core::tracker::TrackerOptions;
use crate::errors::{AppError, AppResult};
use crate::models::rule_set::{RuleSet, RuleSetKind};
use crate::utils::path::expand_tilde;
use crate::utils::time::parse_offset;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-field overrides applied on top of a preset when `rule_set: CUSTOM`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driving_limit_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_duty_limit_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_limit_hours: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_window_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifying_break_minutes: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_rule_set")]
    pub rule_set: String,
    #[serde(default)]
    pub custom_rules: CustomRules,
    #[serde(default = "default_offset")]
    pub home_terminal_offset: String,
    #[serde(default = "default_location")]
    pub default_location: String,
    #[serde(default = "default_refresh")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_retries")]
    pub fetch_retries: u32,
    #[serde(default = "default_backoff")]
    pub retry_backoff_ms: u64,
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
}

/// Keys every complete configuration file carries.
pub const KNOWN_KEYS: [&str; 9] = [
    "database",
    "rule_set",
    "custom_rules",
    "home_terminal_offset",
    "default_location",
    "refresh_interval_secs",
    "fetch_retries",
    "retry_backoff_ms",
    "busy_timeout_ms",
];

fn default_rule_set() -> String {
    RuleSetKind::Us70Hour.as_str().to_string()
}
fn default_offset() -> String {
    "+00:00".to_string()
}
fn default_location() -> String {
    "Unknown".to_string()
}
fn default_refresh() -> u64 {
    60
}
fn default_retries() -> u32 {
    2
}
fn default_backoff() -> u64 {
    250
}
fn default_busy_timeout() -> u64 {
    crate::db::pool::DEFAULT_BUSY_TIMEOUT_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            rule_set: default_rule_set(),
            custom_rules: CustomRules::default(),
            home_terminal_offset: default_offset(),
            default_location: default_location(),
            refresh_interval_secs: default_refresh(),
            fetch_retries: default_retries(),
            retry_backoff_ms: default_backoff(),
            busy_timeout_ms: default_busy_timeout(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rhoslog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rhoslog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rhoslog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rhoslog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let mut cfg: Config =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        let yaml = self.to_yaml()?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize configuration and database files.
    /// Returns the resolved database path.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            config.save(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }

    /// Resolve the configured rule set, applying custom overrides.
    pub fn rule_set(&self) -> AppResult<RuleSet> {
        let kind = RuleSetKind::parse(&self.rule_set)?;
        let mut rules = RuleSet::preset(kind);

        if kind == RuleSetKind::Custom {
            let c = &self.custom_rules;
            if let Some(v) = c.driving_limit_minutes {
                rules.driving_limit_minutes = v;
            }
            if let Some(v) = c.on_duty_limit_minutes {
                rules.on_duty_limit_minutes = v;
            }
            if let Some(v) = c.cycle_limit_hours {
                rules.cycle_limit_hours = v;
            }
            if let Some(v) = c.cycle_window_days {
                rules.cycle_window_days = v;
            }
            if let Some(v) = c.qualifying_break_minutes {
                rules.qualifying_break_minutes = v;
            }
        }

        rules.validate()?;
        Ok(rules)
    }

    pub fn home_offset(&self) -> AppResult<FixedOffset> {
        parse_offset(&self.home_terminal_offset).ok_or_else(|| {
            AppError::Config(format!(
                "invalid home_terminal_offset '{}' (expected ±HH:MM)",
                self.home_terminal_offset
            ))
        })
    }

    pub fn tracker_options(&self) -> AppResult<TrackerOptions> {
        Ok(TrackerOptions {
            fetch_retries: self.fetch_retries,
            retry_backoff: Duration::from_millis(self.retry_backoff_ms),
            home_offset: self.home_offset()?,
        })
    }

    /// Every problem found in the configuration; empty when valid.
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Err(e) = self.rule_set() {
            problems.push(e.to_string());
        }
        if let Err(e) = self.home_offset() {
            problems.push(e.to_string());
        }
        if self.refresh_interval_secs == 0 {
            problems.push("refresh_interval_secs must be at least 1".to_string());
        }
        if self.database.trim().is_empty() {
            problems.push("database path is empty".to_string());
        }
        problems
    }

    /// Top-level keys absent from a raw configuration file.
    pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        let map = value
            .as_mapping()
            .ok_or_else(|| AppError::Config("configuration is not a mapping".into()))?;

        Ok(KNOWN_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(*k))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_file_takes_defaults() {
        let cfg = Config::from_yaml("database: /tmp/hos.sqlite\n").unwrap();
        assert_eq!(cfg.rule_set, "US_70_HOUR");
        assert_eq!(cfg.refresh_interval_secs, 60);
        assert_eq!(cfg.rule_set().unwrap(), RuleSet::us_70_hour());
        assert!(cfg.check().is_empty());
    }

    #[test]
    fn custom_rules_override_the_base_preset() {
        let yaml = "database: /tmp/hos.sqlite\nrule_set: CUSTOM\ncustom_rules:\n  driving_limit_minutes: 600\n  qualifying_break_minutes: 480\n";
        let rules = Config::from_yaml(yaml).unwrap().rule_set().unwrap();
        assert_eq!(rules.kind, RuleSetKind::Custom);
        assert_eq!(rules.driving_limit_minutes, 600);
        assert_eq!(rules.qualifying_break_minutes, 480);
        assert_eq!(rules.on_duty_limit_minutes, 840);
    }

    #[test]
    fn custom_window_beyond_a_year_is_rejected() {
        let yaml = "database: /tmp/hos.sqlite\nrule_set: CUSTOM\ncustom_rules:\n  cycle_window_days: 200000000\n";
        let cfg = Config::from_yaml(yaml).unwrap();
        assert!(matches!(cfg.rule_set(), Err(AppError::InvalidRuleSet(_))));
        assert_eq!(cfg.check().len(), 1);
    }

    #[test]
    fn check_reports_bad_values() {
        let cfg = Config {
            rule_set: "EU".into(),
            home_terminal_offset: "noon".into(),
            ..Config::default()
        };
        assert_eq!(cfg.check().len(), 2);
    }

    #[test]
    fn missing_keys_are_listed() {
        let missing = Config::missing_keys("database: x\nrule_set: US_60_HOUR\n").unwrap();
        assert!(missing.contains(&"home_terminal_offset"));
        assert!(!missing.contains(&"database"));
    }

    #[test]
    fn yaml_round_trip_keeps_settings() {
        let cfg = Config {
            database: "/tmp/a.sqlite".into(),
            rule_set: "US_60_HOUR".into(),
            ..Config::default()
        };
        let back = Config::from_yaml(&cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(back.rule_set().unwrap(), RuleSet::us_60_hour());
        assert!(Config::missing_keys(&cfg.to_yaml().unwrap()).unwrap().is_empty());
    }
}
