//! Daily quote selection.
//!
//! # Invariants
//! - The same date key always maps to the same quote for a given list.
//! - Selection is a pure function; per-day caching lives in the store.

use crate::model::date_key::DateKey;

/// Quotes shipped with the planner, in selection order.
pub const QUOTES: [&str; 7] = [
    "Small progress each day adds up to big results.",
    "You don't have to be perfect to be amazing.",
    "Focus on progress, not perfection.",
    "Stay curious. Keep learning.",
    "One step at a time—today counts.",
    "Your future self will thank you for what you do today.",
    "Make it simple, but significant.",
];

/// 32-bit rolling string hash (`h = h * 31 + unit`) over UTF-16 code units.
pub fn hash_key(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Position in [`QUOTES`] for `date`.
pub fn quote_index(date: DateKey) -> usize {
    let hash = hash_key(&date.to_string());
    (hash.unsigned_abs() as usize) % QUOTES.len()
}

/// Quote for `date`.
pub fn quote_for(date: DateKey) -> &'static str {
    QUOTES[quote_index(date)]
}
