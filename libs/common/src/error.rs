//! Custom error types for the common library
//!
//! This module defines the error types raised by the token stores.

use thiserror::Error;

/// Custom error type for token store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error occurred while reading or writing the backing file
    #[error("Token store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A writer panicked while holding the in-memory token
    #[error("Token store lock poisoned")]
    Poisoned,
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
