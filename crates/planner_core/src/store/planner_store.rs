//! Typed planner records over a key-value store.
//!
//! # Responsibility
//! - Encode/decode tasks, streak, settings and daily quotes as JSON blobs
//!   under fixed keys.
//! - Recover from malformed persisted data by falling back to defaults.
//!
//! # Invariants
//! - Writes always persist a full record snapshot, never a diff.
//! - Decode failures are logged at `warn` and never returned as errors.
//! - Log lines carry keys and error kinds only, never task text.

use crate::model::date_key::DateKey;
use crate::model::settings::Settings;
use crate::model::streak::StreakState;
use crate::model::task::Task;
use crate::model::task_list::TaskList;
use crate::store::kv::{KeyValueStore, StoreError, StoreResult};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub const TASKS_KEY: &str = "student-planner-tasks";
pub const STREAK_KEY: &str = "student-planner-streak";
pub const SETTINGS_KEY: &str = "student-planner-settings";
pub const QUOTE_KEY_PREFIX: &str = "student-planner-quote-";

/// Key of the cached quote for `date`.
pub fn quote_key(date: DateKey) -> String {
    format!("{QUOTE_KEY_PREFIX}{date}")
}

/// Planner persistence adapter.
pub struct PlannerStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> PlannerStore<S> {
    /// Wraps a key-value store.
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Loads the task list; missing or malformed data yields an empty list.
    ///
    /// Entries are decoded one by one, so a single bad entry is dropped
    /// without losing its siblings.
    pub fn load_tasks(&self) -> StoreResult<TaskList> {
        let entries = self
            .read_json::<Vec<Value>>(TASKS_KEY)?
            .unwrap_or_default();
        let tasks: Vec<Task> = entries.iter().filter_map(Task::from_persisted).collect();
        if tasks.len() < entries.len() {
            warn!(
                "event=store_decode module=store status=recovered key={} dropped_entries={}",
                TASKS_KEY,
                entries.len() - tasks.len()
            );
        }
        Ok(TaskList::from_tasks(tasks))
    }

    /// Writes the full task snapshot.
    pub fn save_tasks(&self, tasks: &TaskList) -> StoreResult<()> {
        self.write_json(TASKS_KEY, tasks)
    }

    /// Loads the streak; missing or malformed fields read as their zero value.
    pub fn load_streak(&self) -> StoreResult<StreakState> {
        Ok(self
            .read_json::<Value>(STREAK_KEY)?
            .map(|value| StreakState::from_persisted(&value))
            .unwrap_or_default())
    }

    /// Writes the streak record.
    pub fn save_streak(&self, state: &StreakState) -> StoreResult<()> {
        self.write_json(STREAK_KEY, state)
    }

    /// Loads settings merged onto defaults.
    pub fn load_settings(&self) -> StoreResult<Settings> {
        Ok(self
            .read_json::<Value>(SETTINGS_KEY)?
            .map(|value| Settings::from_persisted(&value))
            .unwrap_or_default())
    }

    /// Writes the full settings record.
    pub fn save_settings(&self, settings: &Settings) -> StoreResult<()> {
        self.write_json(SETTINGS_KEY, settings)
    }

    /// Removes the stored settings record.
    pub fn clear_settings(&self) -> StoreResult<()> {
        self.kv.remove_item(SETTINGS_KEY)
    }

    /// Cached quote for `date`, if one was written.
    ///
    /// Entries written as raw text instead of a JSON string are returned
    /// as-is. Only an empty entry counts as missing; any other text,
    /// whitespace included, is returned unchanged.
    pub fn cached_quote(&self, date: DateKey) -> StoreResult<Option<String>> {
        let key = quote_key(date);
        let Some(raw) = self.kv.get_item(&key)? else {
            return Ok(None);
        };
        let quote = serde_json::from_str::<String>(&raw).unwrap_or(raw);
        if quote.is_empty() {
            return Ok(None);
        }
        Ok(Some(quote))
    }

    /// Stores the quote shown for `date`.
    pub fn cache_quote(&self, date: DateKey, quote: &str) -> StoreResult<()> {
        self.write_json(&quote_key(date), &quote)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(raw) = self.kv.get_item(key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(
                    "event=store_decode module=store status=recovered key={} error_kind={:?} line={} column={}",
                    key,
                    err.classify(),
                    err.line(),
                    err.column()
                );
                Ok(None)
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let encoded = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.kv.set_item(key, &encoded)
    }
}
