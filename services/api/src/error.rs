//! Custom error types for the API client

use serde_json::Value;
use thiserror::Error;

/// Normalized failure of any API operation
///
/// Callers only ever see one of three shapes, whatever went wrong underneath.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The server answered with a non-2xx status and a body
    #[error("Server error ({status}): {payload}")]
    Server { status: u16, payload: Value },

    /// The request never completed, or the response could not be read
    #[error("{0}")]
    Transport(String),

    /// Nothing more specific is known; carries the operation's fallback text
    #[error("{0}")]
    Unknown(String),
}

/// Tag of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ServerError,
    TransportError,
    UnknownError,
}

impl ApiError {
    /// Tag of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Server { .. } => ErrorKind::ServerError,
            ApiError::Transport(_) => ErrorKind::TransportError,
            ApiError::Unknown(_) => ErrorKind::UnknownError,
        }
    }

    /// Human-readable message suitable for an alert
    ///
    /// Server payloads are searched for a `message` or `error` string before
    /// falling back to the payload itself.
    pub fn message(&self) -> String {
        match self {
            ApiError::Server { payload, .. } => match payload {
                Value::String(text) => text.clone(),
                Value::Object(map) => ["message", "error"]
                    .iter()
                    .find_map(|key| map.get(*key).and_then(Value::as_str))
                    .map(str::to_string)
                    .unwrap_or_else(|| payload.to_string()),
                other => other.to_string(),
            },
            ApiError::Transport(message) | ApiError::Unknown(message) => message.clone(),
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
