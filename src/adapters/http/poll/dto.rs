//! HTTP DTOs for poll endpoints.
//!
//! Field names are camelCase on the wire, matching what browser clients
//! send and expect.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::ErrorCode;
use crate::domain::poll::{Snapshot, VoteChoice};
use crate::ports::{ResultsView, SessionInfo};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a new session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Request to join a session by pin code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSessionRequest {
    #[serde(default)]
    pub pin_code: Option<String>,
}

/// Request to rename a session. Accepted only to be refused.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenameSessionRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// A vote. The choice sits under a variant-specific key (`profile` or
/// `level`), so the remaining fields are kept raw and looked up by
/// [`VoteChoice::FIELD`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl VoteRequest {
    /// The raw choice value for variant `C`, if present and not null.
    pub fn choice<C: VoteChoice>(&self) -> Option<&Value> {
        self.fields.get(C::FIELD).filter(|value| !value.is_null())
    }
}

/// Query parameters for the results endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultsQuery {
    #[serde(default)]
    pub format: Option<String>,
}

impl ResultsQuery {
    pub fn wants_csv(&self) -> bool {
        self.format
            .as_deref()
            .map(|format| format.eq_ignore_ascii_case("csv"))
            .unwrap_or(false)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for a created session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub id: String,
    pub name: String,
    pub pin_code: String,
}

impl From<&SessionInfo> for CreateSessionResponse {
    fn from(info: &SessionInfo) -> Self {
        Self {
            id: info.id.to_string(),
            name: info.name.clone(),
            pin_code: info.pin_code.to_string(),
        }
    }
}

/// Response for a joined session.
#[derive(Debug, Clone, Serialize)]
pub struct JoinSessionResponse {
    pub id: String,
    pub name: String,
}

impl From<&SessionInfo> for JoinSessionResponse {
    fn from(info: &SessionInfo) -> Self {
        Self {
            id: info.id.to_string(),
            name: info.name.clone(),
        }
    }
}

/// Results body. Categorical polls report the current tally only; polls
/// with history add the timeline.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResultsResponse<R> {
    Tally {
        id: String,
        name: String,
        results: R,
    },
    Timeline {
        id: String,
        name: String,
        #[serde(rename = "createdAt")]
        created_at: String,
        current: R,
        history: Vec<Snapshot<R>>,
    },
}

impl<C: VoteChoice> From<ResultsView<C>> for ResultsResponse<C::Results> {
    fn from(view: ResultsView<C>) -> Self {
        if C::RECORDS_HISTORY {
            ResultsResponse::Timeline {
                id: view.id.to_string(),
                name: view.name,
                created_at: view.created_at.to_rfc3339(),
                current: view.current,
                history: view.history,
            }
        } else {
            ResultsResponse::Tally {
                id: view.id.to_string(),
                name: view.name,
                results: view.current,
            }
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SessionId, VoterId};
    use crate::domain::poll::{MoodLevel, PinCode, PollSession, Profile};

    fn profile_session() -> PollSession<Profile> {
        PollSession::new(SessionId::new(), "Team Retro", PinCode::normalized("123-456"))
    }

    #[test]
    fn vote_request_reads_variant_field() {
        let req: VoteRequest =
            serde_json::from_str(r#"{"userId": "u1", "profile": "EXPLORER"}"#).unwrap();
        assert_eq!(req.user_id.as_deref(), Some("u1"));
        assert_eq!(req.choice::<Profile>(), Some(&Value::from("EXPLORER")));
        assert_eq!(req.choice::<MoodLevel>(), None);
    }

    #[test]
    fn vote_request_treats_null_choice_as_missing() {
        let req: VoteRequest = serde_json::from_str(r#"{"userId": "u1", "level": null}"#).unwrap();
        assert_eq!(req.choice::<MoodLevel>(), None);
    }

    #[test]
    fn join_request_uses_camel_case() {
        let req: JoinSessionRequest = serde_json::from_str(r#"{"pinCode": "123-456"}"#).unwrap();
        assert_eq!(req.pin_code.as_deref(), Some("123-456"));
    }

    #[test]
    fn results_query_detects_csv() {
        let query = ResultsQuery {
            format: Some("CSV".to_string()),
        };
        assert!(query.wants_csv());
        assert!(!ResultsQuery::default().wants_csv());
    }

    #[test]
    fn create_response_serializes_pin_code_in_camel_case() {
        let session = profile_session();
        let json = serde_json::to_value(CreateSessionResponse::from(&SessionInfo::of(&session))).unwrap();
        assert_eq!(json["pinCode"], "123-456");
        assert_eq!(json["name"], "Team Retro");
    }

    #[test]
    fn profile_results_serialize_as_tally() {
        let mut session = profile_session();
        session.cast_vote(VoterId::new("u1").unwrap(), Profile::Prisoner);

        let response: ResultsResponse<_> = ResultsView::of(&session).into();
        let json = serde_json::to_value(response).unwrap();

        assert_eq!(json["results"]["PRISONER"], 1);
        assert_eq!(json["results"]["EXPLORER"], 0);
        assert!(json.get("history").is_none());
    }

    #[test]
    fn mood_results_serialize_as_timeline() {
        let mut session: PollSession<MoodLevel> =
            PollSession::new(SessionId::new(), "Daily Check", PinCode::normalized("ABC-123"));
        session.cast_vote(VoterId::new("u1").unwrap(), MoodLevel::new(7).unwrap());
        session.capture_snapshot();

        let response: ResultsResponse<_> = ResultsView::of(&session).into();
        let json = serde_json::to_value(response).unwrap();

        assert_eq!(json["current"]["averageMood"], 7.0);
        assert_eq!(json["current"]["totalVotes"], 1);
        assert_eq!(json["current"]["results"]["7"], 1);
        assert_eq!(json["history"][0]["totalVotes"], 1);
        assert!(json["history"][0]["timestamp"].is_string());
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn error_response_carries_stable_code() {
        let error = ErrorResponse::bad_request("Session name is required");
        assert_eq!(error.code, "VALIDATION_FAILED");
        assert_eq!(error.message, "Session name is required");
    }
}
