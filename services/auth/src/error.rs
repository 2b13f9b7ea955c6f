//! Custom error types for the session flows

use common::StoreError;
use notes_api::ApiError;
use thiserror::Error;

/// Failure to read claims out of a token
#[derive(Error, Debug)]
pub enum ClaimsError {
    #[error("Malformed token: {0}")]
    Malformed(#[from] jsonwebtoken::errors::Error),
}

pub type ClaimsResult<T> = Result<T, ClaimsError>;

/// Failure of a login, registration or logout
#[derive(Error, Debug)]
pub enum AuthError {
    /// The server call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The token could not be persisted or erased
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Human-readable message suitable for an alert
    pub fn message(&self) -> String {
        match self {
            AuthError::Api(e) => e.message(),
            AuthError::Store(e) => e.to_string(),
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
