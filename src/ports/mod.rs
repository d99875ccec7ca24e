//! Ports - Interfaces between the domain and the outside world.
//!
//! Following hexagonal architecture, ports define the contracts the HTTP
//! layer and background services depend on. Adapters implement them.
//!
//! - `PollRepository` - session lifecycle, votes and results for one variant
//! - `SessionRetirement` - variant-independent retirement used by the reaper

mod poll_repository;

pub use poll_repository::{PollRepository, ResultsView, SessionInfo, SessionRetirement};
