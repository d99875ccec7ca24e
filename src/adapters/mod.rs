//! Adapters - Implementations of port interfaces.
//!
//! - `http` - axum transport for both poll variants
//! - `memory` - in-memory repositories, snapshot timers and the session reaper

pub mod http;
pub mod memory;

pub use http::app_router;
pub use memory::{InMemoryPollRepository, PollSettings, SessionReaper, SessionReaperConfig};
