//! Ordered task list model.
//!
//! # Responsibility
//! - Apply add/toggle/edit/remove mutations in insertion order.
//! - Derive completion progress.
//!
//! # Invariants
//! - Every stored task has non-blank text.
//! - Tasks are addressed by zero-based position; removal shifts later
//!   positions down by one.
//! - `progress_percent()` is 0 for an empty list.
//!
//! This module has no storage awareness; see `service::planner_service` for
//! the persistence wiring.

use crate::model::date_key::DateKey;
use crate::model::task::Task;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TaskListResult<T> = Result<T, TaskListError>;

/// Errors from task list mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListError {
    /// No task at this position.
    NotFound { index: usize, len: usize },
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { index, len } => {
                write!(f, "task not found at position {index} (list has {len})")
            }
        }
    }
}

impl Error for TaskListError {}

/// Result of a text edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Text replaced in place.
    Updated,
    /// Edited text was blank, so the task was deleted.
    Removed(Task),
}

/// In-memory task list, persisted as a full snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from decoded tasks, dropping blank entries.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: tasks
                .into_iter()
                .filter(|task| !task.text.trim().is_empty())
                .collect(),
        }
    }

    /// Appends a new incomplete task.
    ///
    /// Returns the new position, or `None` when `text` is blank.
    pub fn add(&mut self, text: &str) -> Option<usize> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.tasks.push(Task::new(trimmed));
        Some(self.tasks.len() - 1)
    }

    /// Flips completion of the task at `index`.
    ///
    /// Completing stamps `today`; reopening clears the date. Returns the new
    /// completion flag.
    pub fn toggle_complete(&mut self, index: usize, today: DateKey) -> TaskListResult<bool> {
        let task = self.get_mut(index)?;
        if task.completed {
            task.reopen();
        } else {
            task.complete_on(today);
        }
        Ok(task.completed)
    }

    /// Replaces the text of the task at `index`.
    ///
    /// Blank text deletes the task instead.
    pub fn edit_text(&mut self, index: usize, new_text: &str) -> TaskListResult<EditOutcome> {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return self.remove(index).map(EditOutcome::Removed);
        }
        let task = self.get_mut(index)?;
        task.text = trimmed.to_string();
        Ok(EditOutcome::Updated)
    }

    /// Deletes the task at `index`.
    pub fn remove(&mut self, index: usize) -> TaskListResult<Task> {
        if index >= self.tasks.len() {
            return Err(self.not_found(index));
        }
        Ok(self.tasks.remove(index))
    }

    /// Reopens every task completed on `date`. Returns how many changed.
    pub fn reset_day(&mut self, date: DateKey) -> usize {
        let mut reset = 0;
        for task in self.tasks.iter_mut().filter(|task| task.is_done_on(date)) {
            task.reopen();
            reset += 1;
        }
        reset
    }

    /// `round(100 * completed / total)`, or 0 for an empty list.
    pub fn progress_percent(&self) -> u8 {
        let total = self.tasks.len();
        if total == 0 {
            return 0;
        }
        let done = self.completed_count();
        // Integer form of round-half-up on a non-negative ratio.
        ((200 * done + total) / (2 * total)) as u8
    }

    /// Number of completed tasks.
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    /// Whether any task carries a completion on `date`.
    pub fn has_completion_on(&self, date: DateKey) -> bool {
        self.tasks.iter().any(|task| task.is_done_on(date))
    }

    /// Task at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Tasks in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn get_mut(&mut self, index: usize) -> TaskListResult<&mut Task> {
        let len = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or(TaskListError::NotFound { index, len })
    }

    fn not_found(&self, index: usize) -> TaskListError {
        TaskListError::NotFound {
            index,
            len: self.tasks.len(),
        }
    }
}
