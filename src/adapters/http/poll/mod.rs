//! HTTP adapter for poll endpoints.

mod csv;
mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateSessionRequest, CreateSessionResponse, ErrorResponse, JoinSessionRequest,
    JoinSessionResponse, RenameSessionRequest, ResultsQuery, ResultsResponse, VoteRequest,
};
pub use handlers::{health, PollAppState};
pub use routes::poll_routes;
