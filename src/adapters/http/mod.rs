//! HTTP adapters - REST API implementations.
//!
//! One generic poll adapter is mounted once per variant by [`app_router`].

pub mod poll;
mod router;

pub use poll::{poll_routes, PollAppState};
pub use router::{app_router, MOOD_PREFIX, PROFILE_PREFIX};
