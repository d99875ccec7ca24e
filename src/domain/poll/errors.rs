//! Poll-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};

/// Failures reported by poll repositories.
///
/// None of these are fatal; each maps onto one HTTP status in the
/// transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    /// No live session matches the id or pin code.
    #[error("Session not found: {0}")]
    NotFound(String),

    /// The submitted vote is outside the poll's option domain.
    #[error("Invalid vote: {0}")]
    InvalidValue(#[from] ValidationError),

    /// Session names are fixed at creation.
    #[error("Session names cannot be modified after creation")]
    RenameUnsupported,

    /// The pin generator gave up after too many collisions.
    #[error("No free pin code found after {attempts} attempts")]
    PinSpaceExhausted { attempts: u32 },
}

impl PollError {
    pub fn not_found(key: impl ToString) -> Self {
        PollError::NotFound(key.to_string())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PollError::NotFound(_) => ErrorCode::SessionNotFound,
            PollError::InvalidValue(_) => ErrorCode::InvalidVote,
            PollError::RenameUnsupported => ErrorCode::RenameUnsupported,
            PollError::PinSpaceExhausted { .. } => ErrorCode::PinSpaceExhausted,
        }
    }
}
