//! Configuration loaded from `config.toml` in the data directory.
//!
//! Every field has a default, so a missing file or a partial file is fine.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reminder: ReminderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// When the reminder counts as due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueRule {
    /// Only while the clock reads exactly the reminder minute
    Exact,
    /// Any time at or after the reminder minute, until midnight
    #[default]
    Since,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReminderConfig {
    #[serde(default)]
    pub rule: DueRule,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Snooze choices offered by the reminder prompt, in minutes
    #[serde(default = "default_snooze_options")]
    pub snooze_options: Vec<u32>,
}

fn default_poll_interval() -> u64 {
    10
}

fn default_snooze_options() -> Vec<u32> {
    vec![15, 60]
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            rule: DueRule::default(),
            poll_interval_secs: default_poll_interval(),
            snooze_options: default_snooze_options(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load from a TOML file, falling back to defaults when it doesn't exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let reminder = &self.reminder;
        if !(1..=60).contains(&reminder.poll_interval_secs) {
            return Err(ConfigError::Invalid(format!(
                "reminder.poll_interval_secs must be between 1 and 60, got {}",
                reminder.poll_interval_secs
            )));
        }
        if reminder.snooze_options.is_empty() || reminder.snooze_options.len() > 9 {
            return Err(ConfigError::Invalid(
                "reminder.snooze_options must list between 1 and 9 durations".to_string(),
            ));
        }
        if reminder.snooze_options.contains(&0) {
            return Err(ConfigError::Invalid(
                "reminder.snooze_options entries must be greater than zero".to_string(),
            ));
        }
        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            return Err(ConfigError::Invalid(format!(
                "logging.level {:?} is not a valid filter: {}",
                self.logging.level, e
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.reminder.rule, DueRule::Since);
        assert_eq!(config.reminder.poll_interval_secs, 10);
        assert_eq!(config.reminder.snooze_options, vec![15, 60]);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml(
            r#"
            [reminder]
            rule = "exact"
            snooze_options = [5, 10, 30]
            "#,
        )
        .unwrap();
        assert_eq!(config.reminder.rule, DueRule::Exact);
        assert_eq!(config.reminder.poll_interval_secs, 10);
        assert_eq!(config.reminder.snooze_options, vec![5, 10, 30]);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_toml("[reminder]\npoll_interval_secs = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml("[reminder]\nsnooze_options = []"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml("[logging]\nlevel = \"allerease=loud\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml("[reminder]\nrule = \"sometimes\""),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config.reminder.rule, DueRule::Since);
    }

    #[test]
    fn test_load_reports_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[reminder\n").unwrap();

        match Config::load(&path) {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
