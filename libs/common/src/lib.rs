//! Common library for the notes client
//!
//! This crate provides the pieces shared by every other crate in the
//! workspace: the session token store, client configuration, tracing setup
//! and their error types.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod token_store;

pub use config::ClientConfig;
pub use error::{StoreError, StoreResult};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
