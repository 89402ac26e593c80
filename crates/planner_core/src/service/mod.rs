//! Core use-case services.
//!
//! # Responsibility
//! - Wire model mutations to persistence.
//! - Keep presentation layers decoupled from storage details.

pub mod planner_service;
