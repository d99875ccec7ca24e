//! HTTP handlers for poll endpoints.
//!
//! Every handler is generic over the poll variant, so the profile and mood
//! routers share one implementation.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::domain::foundation::{SessionId, VoterId};
use crate::domain::poll::{PollError, VoteChoice};
use crate::ports::PollRepository;

use super::csv;
use super::dto::{
    CreateSessionRequest, CreateSessionResponse, ErrorResponse, JoinSessionRequest,
    JoinSessionResponse, RenameSessionRequest, ResultsQuery, ResultsResponse, VoteRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// State shared by the handlers of one poll variant.
pub struct PollAppState<C: VoteChoice> {
    pub repository: Arc<dyn PollRepository<C>>,
}

impl<C: VoteChoice> PollAppState<C> {
    pub fn new(repository: Arc<dyn PollRepository<C>>) -> Self {
        Self { repository }
    }
}

impl<C: VoteChoice> Clone for PollAppState<C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST / - Create a new session
pub async fn create_session<C: VoteChoice>(
    State(state): State<PollAppState<C>>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_body(rejection),
    };

    let name = match req.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return bad_request("Session name is required"),
    };

    match state.repository.create_session(&name) {
        Ok(info) => (StatusCode::OK, Json(CreateSessionResponse::from(&info))).into_response(),
        Err(e) => handle_poll_error(e),
    }
}

/// POST /join - Find a session by its pin code
pub async fn join_session<C: VoteChoice>(
    State(state): State<PollAppState<C>>,
    payload: Result<Json<JoinSessionRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_body(rejection),
    };

    let pin_code = match req.pin_code.as_deref().map(str::trim) {
        Some(pin) if !pin.is_empty() => pin.to_string(),
        _ => return bad_request("Pin code is required"),
    };

    match state.repository.find_by_pin_code(&pin_code) {
        Some(info) => (StatusCode::OK, Json(JoinSessionResponse::from(&info))).into_response(),
        None => handle_poll_error(PollError::not_found(pin_code)),
    }
}

/// PUT /:id/name - Always refused
pub async fn rename_session<C: VoteChoice>(
    State(state): State<PollAppState<C>>,
    Path(id): Path<String>,
    payload: Result<Json<RenameSessionRequest>, JsonRejection>,
) -> Response {
    let new_name = payload.ok().and_then(|Json(req)| req.name).unwrap_or_default();

    match state.repository.rename(&id, &new_name) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => handle_poll_error(e),
    }
}

/// POST /:id/votes - Record or overwrite a vote
pub async fn submit_vote<C: VoteChoice>(
    State(state): State<PollAppState<C>>,
    Path(id): Path<String>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_body(rejection),
    };

    let (user_id, raw_choice) = match (req.user_id.as_deref(), req.choice::<C>()) {
        (Some(user_id), Some(choice)) if !user_id.trim().is_empty() => (user_id, choice),
        _ => return bad_request(format!("User ID and {} are required", C::FIELD)),
    };

    // Voter ids are opaque: stored exactly as sent.
    let voter = match VoterId::new(user_id) {
        Ok(voter) => voter,
        Err(e) => return bad_request(e.to_string()),
    };

    let choice = match C::parse(raw_choice) {
        Ok(choice) => choice,
        Err(e) => return handle_poll_error(e.into()),
    };

    let session_id = match parse_session_id(&id) {
        Ok(session_id) => session_id,
        Err(e) => return handle_poll_error(e),
    };

    match state.repository.record_vote(&session_id, voter, choice) {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => handle_poll_error(e),
    }
}

/// GET /:id/results - Current results as JSON, or CSV with `?format=csv`
pub async fn get_results<C: VoteChoice>(
    State(state): State<PollAppState<C>>,
    Path(id): Path<String>,
    Query(query): Query<ResultsQuery>,
) -> Response {
    let view = match parse_session_id(&id).and_then(|id| state.repository.results(&id)) {
        Ok(view) => view,
        Err(e) => return handle_poll_error(e),
    };

    if query.wants_csv() {
        let disposition = format!("attachment; filename=\"{}\"", csv::filename(&view));
        return (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            csv::render(&view),
        )
            .into_response();
    }

    let response: ResultsResponse<C::Results> = view.into();
    (StatusCode::OK, Json(response)).into_response()
}

/// DELETE /:id - Retire a session and stop its timer
pub async fn retire_session<C: VoteChoice>(
    State(state): State<PollAppState<C>>,
    Path(id): Path<String>,
) -> Response {
    match parse_session_id(&id).and_then(|id| state.repository.retire_session(&id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_poll_error(e),
    }
}

/// GET /health - Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// Ids that are not UUIDs cannot name a live session.
fn parse_session_id(raw: &str) -> Result<SessionId, PollError> {
    raw.parse::<SessionId>()
        .map_err(|_| PollError::not_found(raw))
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
        .into_response()
}

fn bad_body(rejection: JsonRejection) -> Response {
    bad_request(rejection.body_text())
}

pub(crate) fn handle_poll_error(error: PollError) -> Response {
    let (status, message) = match &error {
        PollError::NotFound(_) => (StatusCode::NOT_FOUND, error.to_string()),
        PollError::InvalidValue(_) | PollError::RenameUnsupported => {
            (StatusCode::BAD_REQUEST, error.to_string())
        }
        PollError::PinSpaceExhausted { attempts } => {
            warn!(attempts, "pin space exhausted, refusing to create session");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not allocate a pin code".to_string(),
            )
        }
    };

    (status, Json(ErrorResponse::new(error.code(), message))).into_response()
}
