//! Persistence layer.
//!
//! # Responsibility
//! - Define the key-value storage contract and its SQLite implementation.
//! - Map planner records to JSON blobs under fixed keys.
//!
//! # Invariants
//! - Malformed persisted data degrades to defaults instead of failing.

pub mod kv;
pub mod planner_store;
