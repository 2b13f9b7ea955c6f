//! REST client for the notes server
//!
//! [`ApiClient`] implements the six operations the app needs behind the
//! [`AuthApi`] and [`NotesApi`] traits. Every failure is normalized into an
//! [`ApiError`].

pub mod client;
pub mod error;
pub mod models;
pub mod routes;
pub mod service;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use models::{CreateNoteResponse, Credentials, LoginResponse, Note, NotePayload};
pub use service::{AuthApi, NotesApi};
