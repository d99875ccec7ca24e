//! Live Poll - real-time audience polling backend
//!
//! Two poll variants share one implementation:
//!
//! - **Profile** polls, where each participant picks one of four
//!   participation profiles (Explorer, Shopper, Vacationer, Prisoner)
//! - **Mood** polls, where each participant rates their mood from 1 to 10
//!   and the session keeps a timestamped history of the aggregate
//!
//! Sessions are created by a facilitator, joined by pin code, and live in
//! memory. The crate follows a ports-and-adapters layout: `domain` holds
//! the poll model, `ports` the repository contract, and `adapters` the
//! in-memory store and the axum transport.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
