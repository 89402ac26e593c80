//! Task record.
//!
//! # Responsibility
//! - Define the persisted task shape `{ text, completed, completedDate }`.
//! - Normalize legacy and inconsistent persisted entries on decode.
//!
//! # Invariants
//! - `completed_date.is_some() == completed`.
//! - `completed_date` is the day completion was last toggled on.
//! - Decoding one entry never depends on its siblings.

use crate::model::date_key::DateKey;
use serde::Serialize;
use serde_json::Value;

/// One entry of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub text: String,
    pub completed: bool,
    #[serde(rename = "completedDate")]
    pub completed_date: Option<DateKey>,
}

impl Task {
    /// Creates an incomplete task.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
            completed_date: None,
        }
    }

    /// Decodes one persisted entry field by field.
    ///
    /// Bare strings are legacy entries. Wrong-typed `completed` or
    /// `completedDate` fields fall back to an open task. Returns `None` when
    /// the entry carries no usable text.
    pub fn from_persisted(value: &Value) -> Option<Self> {
        let (text, completed, completed_date) = match value {
            Value::String(text) => (text.clone(), false, None),
            Value::Object(object) => (
                object.get("text").and_then(text_of)?,
                object.get("completed").is_some_and(is_truthy),
                object
                    .get("completedDate")
                    .and_then(Value::as_str)
                    .and_then(|raw| raw.parse::<DateKey>().ok()),
            ),
            _ => return None,
        };
        if text.trim().is_empty() {
            return None;
        }

        match (completed, completed_date) {
            (true, Some(date)) => Some(Self {
                text,
                completed: true,
                completed_date: Some(date),
            }),
            // A completion without a usable date cannot count toward any
            // day, so it is reopened.
            _ => Some(Self::new(text)),
        }
    }

    /// Marks the task complete on `date`.
    pub fn complete_on(&mut self, date: DateKey) {
        self.completed = true;
        self.completed_date = Some(date);
    }

    /// Clears completion state.
    pub fn reopen(&mut self) {
        self.completed = false;
        self.completed_date = None;
    }

    /// Returns whether the task was completed on `date` ("done today" badge).
    pub fn is_done_on(&self, date: DateKey) -> bool {
        self.completed && self.completed_date == Some(date)
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
