//! Daily completion streak.
//!
//! # Responsibility
//! - Decide how a completion on `today` changes the stored streak.
//!
//! # Invariants
//! - At most one change per calendar day; re-evaluation is a no-op.
//! - `count` grows by exactly one only when `last_date` advances by one day.
//! - Any other advance (gap, or a clock moved backwards) resets `count` to 1.

use crate::model::date_key::DateKey;
use crate::model::settings::Settings;
use crate::model::task_list::TaskList;
use serde::Serialize;
use serde_json::Value;

/// Persisted streak record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakState {
    pub count: u32,
    #[serde(rename = "lastDate")]
    pub last_date: Option<DateKey>,
}

impl StreakState {
    /// Builds a streak record.
    pub fn new(count: u32, last_date: Option<DateKey>) -> Self {
        Self { count, last_date }
    }

    /// Decodes a persisted record field by field.
    ///
    /// `count` accepts any non-negative number, truncated toward zero;
    /// negative or non-numeric counts read as 0. An unparsable `lastDate`
    /// reads as `None`. Non-object values yield the zero streak.
    pub fn from_persisted(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let count = object.get("count").map(count_of).unwrap_or(0);
        let last_date = object
            .get("lastDate")
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse::<DateKey>().ok());

        Self { count, last_date }
    }
}

fn count_of(value: &Value) -> u32 {
    if let Some(count) = value.as_u64() {
        return u32::try_from(count).unwrap_or(u32::MAX);
    }
    match value.as_f64() {
        Some(count) if count.is_finite() && count > 0.0 => count.min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}

/// Outcome of one streak evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakUpdate {
    /// No completion on the evaluated day, or the day was already counted.
    Unchanged,
    /// State advanced to `state`; `previous_count` is what was shown before.
    Advanced {
        previous_count: u32,
        state: StreakState,
    },
}

impl StreakUpdate {
    /// New state to persist, if any.
    pub fn new_state(&self) -> Option<StreakState> {
        match self {
            Self::Unchanged => None,
            Self::Advanced { state, .. } => Some(*state),
        }
    }

    /// Whether the displayed counter went up (celebration signal).
    pub fn incremented(&self) -> bool {
        match self {
            Self::Unchanged => false,
            Self::Advanced {
                previous_count,
                state,
            } => state.count > *previous_count,
        }
    }

    /// Whether a celebration animation should play under `settings`.
    pub fn should_animate(&self, settings: &Settings) -> bool {
        self.incremented() && !settings.reduced_motion
    }
}

/// Evaluates the streak for a completion check on `today`.
pub fn evaluate_streak(state: &StreakState, tasks: &TaskList, today: DateKey) -> StreakUpdate {
    if !tasks.has_completion_on(today) {
        return StreakUpdate::Unchanged;
    }
    if state.last_date == Some(today) {
        return StreakUpdate::Unchanged;
    }

    let count = match state.last_date {
        Some(last) if today.is_day_after(last) => state.count.saturating_add(1),
        _ => 1,
    };

    StreakUpdate::Advanced {
        previous_count: state.count,
        state: StreakState {
            count,
            last_date: Some(today),
        },
    }
}
