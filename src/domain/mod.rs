//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `poll` - Poll sessions, vote choices, results and snapshots

pub mod foundation;
pub mod poll;
