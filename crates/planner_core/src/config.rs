//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve database path, log directory and log level from the
//!   environment with platform defaults.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - The resolved log level is always one of `trace|debug|info|warn|error`.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "PLANNER_DB_PATH";
pub const LOG_DIR_ENV: &str = "PLANNER_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "PLANNER_LOG_LEVEL";

const APP_DIR_NAME: &str = "student-planner";
const DB_FILE_NAME: &str = "planner.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved planner configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

impl PlannerConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let app_dir = default_app_dir();
        let db_path = non_blank(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| app_dir.join(DB_FILE_NAME));
        let log_dir = non_blank(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| app_dir.join(LOG_DIR_NAME));
        let log_level = match non_blank(LOG_LEVEL_ENV) {
            Some(raw) => normalize_level(&raw).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }

    /// Replaces the log level, validating it first.
    pub fn with_log_level(mut self, level: &str) -> Result<Self, ConfigError> {
        self.log_level = normalize_level(level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(self)
    }
}

fn default_app_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PlannerConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_live_under_app_dir() {
        let config = PlannerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.db_path.ends_with("student-planner/planner.sqlite3"));
        assert!(config.log_dir.ends_with("student-planner/logs"));
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn environment_overrides_and_blank_values() {
        let config = PlannerConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, " /tmp/planner-test.sqlite3 "),
            (LOG_DIR_ENV, "   "),
            (LOG_LEVEL_ENV, "WARNING"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/planner-test.sqlite3"));
        assert!(config.log_dir.ends_with("student-planner/logs"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn invalid_level_is_rejected() {
        let err = PlannerConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));

        let config = PlannerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.clone().with_log_level("verbose").is_err());
        assert_eq!(config.with_log_level("trace").unwrap().log_level, "trace");
    }
}
