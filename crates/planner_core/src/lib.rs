//! Core domain logic for the student planner.
//! This crate is the single source of truth for task, streak and quote invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, PlannerConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::date_key::{DateKey, DateKeyParseError};
pub use model::quote::{quote_for, quote_index, QUOTES};
pub use model::settings::{Accent, BgMode, Settings, SettingsParseError, SettingsPatch};
pub use model::streak::{evaluate_streak, StreakState, StreakUpdate};
pub use model::task::Task;
pub use model::task_list::{EditOutcome, TaskList, TaskListError};
pub use service::planner_service::{PlannerService, ServiceError, ServiceResult, ToggleReport};
pub use store::kv::{KeyValueStore, SqliteKeyValueStore, StoreError, StoreResult};
pub use store::planner_store::PlannerStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
