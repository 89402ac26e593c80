//! Planner use-case service.
//!
//! # Responsibility
//! - Hold the store adapter and the in-memory model for one session.
//! - Route every mutation through the model, then persist a full snapshot.
//! - Re-evaluate the streak after completion toggles.
//!
//! # Invariants
//! - In-memory state is only updated after the corresponding write succeeds.
//! - Quotes are cached per day; a cached entry is returned unchanged.
//! - Service layer stays presentation-agnostic.

use crate::model::date_key::DateKey;
use crate::model::quote::quote_for;
use crate::model::settings::{Settings, SettingsPatch};
use crate::model::streak::{evaluate_streak, StreakState, StreakUpdate};
use crate::model::task::Task;
use crate::model::task_list::{EditOutcome, TaskList, TaskListError};
use crate::store::kv::{KeyValueStore, StoreError};
use crate::store::planner_store::PlannerStore;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from planner use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Task position does not exist.
    Task(TaskListError),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Task(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<TaskListError> for ServiceError {
    fn from(value: TaskListError) -> Self {
        Self::Task(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Result of toggling one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleReport {
    /// Completion flag after the toggle.
    pub completed: bool,
    /// Progress after the toggle.
    pub progress: u8,
    /// Streak re-evaluation outcome.
    pub streak: StreakUpdate,
}

/// Session context: store adapter plus in-memory model.
///
/// Constructed once at startup and handed to the presentation layer.
pub struct PlannerService<S: KeyValueStore> {
    store: PlannerStore<S>,
    tasks: TaskList,
    streak: StreakState,
    settings: Settings,
}

impl<S: KeyValueStore> PlannerService<S> {
    /// Loads persisted state, degrading to defaults for malformed entries.
    pub fn open(kv: S) -> ServiceResult<Self> {
        let store = PlannerStore::new(kv);
        let tasks = store.load_tasks()?;
        let streak = store.load_streak()?;
        let settings = store.load_settings()?;
        info!(
            "event=service_open module=service status=ok task_count={} streak_count={}",
            tasks.len(),
            streak.count
        );
        Ok(Self {
            store,
            tasks,
            streak,
            settings,
        })
    }

    /// Current task list.
    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Current streak record.
    pub fn streak(&self) -> StreakState {
        self.streak
    }

    /// Current appearance settings.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Completion percentage of the current list.
    pub fn progress_percent(&self) -> u8 {
        self.tasks.progress_percent()
    }

    /// Appends a task. Blank input is ignored and returns `None`.
    pub fn add_task(&mut self, text: &str) -> ServiceResult<Option<usize>> {
        let mut next = self.tasks.clone();
        let Some(index) = next.add(text) else {
            debug!("event=task_add module=service status=skipped reason=blank_text");
            return Ok(None);
        };
        self.commit_tasks(next)?;
        info!(
            "event=task_add module=service status=ok index={} task_count={}",
            index,
            self.tasks.len()
        );
        Ok(Some(index))
    }

    /// Flips completion of the task at `index` and re-evaluates the streak.
    pub fn toggle_task(&mut self, index: usize, today: DateKey) -> ServiceResult<ToggleReport> {
        let mut next = self.tasks.clone();
        let completed = next.toggle_complete(index, today)?;
        self.commit_tasks(next)?;
        let streak = self.evaluate_streak(today)?;
        let progress = self.progress_percent();
        info!(
            "event=task_toggle module=service status=ok index={} completed={} progress={}",
            index, completed, progress
        );
        Ok(ToggleReport {
            completed,
            progress,
            streak,
        })
    }

    /// Replaces task text; blank text deletes the task.
    pub fn edit_task(&mut self, index: usize, text: &str) -> ServiceResult<EditOutcome> {
        let mut next = self.tasks.clone();
        let outcome = next.edit_text(index, text)?;
        self.commit_tasks(next)?;
        let action = match outcome {
            EditOutcome::Updated => "updated",
            EditOutcome::Removed(_) => "removed",
        };
        info!(
            "event=task_edit module=service status=ok index={} action={}",
            index, action
        );
        Ok(outcome)
    }

    /// Deletes the task at `index` and returns it.
    pub fn remove_task(&mut self, index: usize) -> ServiceResult<Task> {
        let mut next = self.tasks.clone();
        let removed = next.remove(index)?;
        self.commit_tasks(next)?;
        info!(
            "event=task_remove module=service status=ok index={} task_count={}",
            index,
            self.tasks.len()
        );
        Ok(removed)
    }

    /// Reopens every task completed on `today`. The streak is left as is.
    pub fn reset_day(&mut self, today: DateKey) -> ServiceResult<usize> {
        let mut next = self.tasks.clone();
        let reset = next.reset_day(today);
        if reset > 0 {
            self.commit_tasks(next)?;
        }
        info!(
            "event=task_reset_day module=service status=ok date={} reset_count={}",
            today, reset
        );
        Ok(reset)
    }

    /// Re-evaluates the streak for `today` and persists any change.
    pub fn evaluate_streak(&mut self, today: DateKey) -> ServiceResult<StreakUpdate> {
        let update = evaluate_streak(&self.streak, &self.tasks, today);
        if let Some(state) = update.new_state() {
            self.store.save_streak(&state)?;
            self.streak = state;
            info!(
                "event=streak_update module=service status=ok count={} incremented={}",
                state.count,
                update.incremented()
            );
        }
        Ok(update)
    }

    /// Quote for `date`, computed once and cached for that day.
    pub fn quote_for(&self, date: DateKey) -> ServiceResult<String> {
        if let Some(cached) = self.store.cached_quote(date)? {
            debug!("event=quote_select module=service status=ok source=cache date={date}");
            return Ok(cached);
        }
        let quote = quote_for(date);
        self.store.cache_quote(date, quote)?;
        debug!("event=quote_select module=service status=ok source=computed date={date}");
        Ok(quote.to_string())
    }

    /// Merges `patch` onto the persisted settings and saves the result.
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> ServiceResult<Settings> {
        let merged = self.store.load_settings()?.merged(patch);
        self.store.save_settings(&merged)?;
        self.settings = merged;
        info!(
            "event=settings_update module=service status=ok bg_mode={} reduced_motion={} accent={}",
            merged.bg_mode.as_str(),
            merged.reduced_motion,
            merged.accent.as_str()
        );
        Ok(merged)
    }

    /// Drops persisted settings and stores the defaults.
    pub fn reset_settings(&mut self) -> ServiceResult<Settings> {
        self.store.clear_settings()?;
        let defaults = Settings::default();
        self.store.save_settings(&defaults)?;
        self.settings = defaults;
        info!("event=settings_reset module=service status=ok");
        Ok(defaults)
    }

    fn commit_tasks(&mut self, next: TaskList) -> ServiceResult<()> {
        self.store.save_tasks(&next)?;
        self.tasks = next;
        Ok(())
    }
}
