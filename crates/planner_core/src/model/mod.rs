//! Pure planner domain model.
//!
//! # Responsibility
//! - Define task, streak, quote and settings rules with no storage or
//!   presentation awareness.
//!
//! # Invariants
//! - Every day-based rule compares `DateKey` values, never raw strings.

pub mod date_key;
pub mod quote;
pub mod settings;
pub mod streak;
pub mod task;
pub mod task_list;
