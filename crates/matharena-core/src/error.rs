//! Error types shared by the client and the pages.
//!
//! `ApiError` describes how a backend call failed. The page layer wraps it
//! in `GameError` or turns it into an inline message; nothing is retried.

use thiserror::Error;

/// Errors that can occur when talking to the MathArena backend.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The backend could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The backend answered with a non-success status.
    #[error("backend rejected request (HTTP {status}): {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        /// The `message` field of the backend's JSON error body, if any.
        message: Option<String>,
    },

    /// A success response could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// The message the backend attached to a rejection, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// HTTP status of a rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Game-session failures, displayed to the player verbatim.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Failed to create game session")]
    CreateFailed(#[source] ApiError),

    #[error("Failed to submit answer")]
    AnswerFailed(#[source] ApiError),

    #[error("Failed to finish game")]
    FinishFailed(#[source] ApiError),
}

/// Client-side form validation failures. No request is sent for these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a number")]
    NotANumber,
}

/// Failures reading or writing the stored session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
