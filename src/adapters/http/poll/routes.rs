//! HTTP routes for poll endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::domain::poll::VoteChoice;

use super::handlers::{
    create_session, get_results, join_session, rename_session, retire_session, submit_vote,
    PollAppState,
};

/// Creates the router for one poll variant, to be nested under its prefix.
pub fn poll_routes<C: VoteChoice>(state: PollAppState<C>) -> Router {
    Router::new()
        .route("/", post(create_session::<C>))
        .route("/join", post(join_session::<C>))
        .route("/:id", delete(retire_session::<C>))
        .route("/:id/name", put(rename_session::<C>))
        .route("/:id/votes", post(submit_vote::<C>))
        .route("/:id/results", get(get_results::<C>))
        .with_state(state)
}
