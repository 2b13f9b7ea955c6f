//! Operation traits implemented by [`crate::ApiClient`]
//!
//! View models depend on these rather than on the HTTP client so they can be
//! driven by in-memory fakes.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiResult;
use crate::models::{CreateNoteResponse, Credentials, LoginResponse, Note, NotePayload};

/// Unauthenticated account operations
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse>;

    /// Create an account; the payload is passed through untouched
    async fn register(&self, credentials: &Credentials) -> ApiResult<Value>;
}

/// Note operations, authenticated with the stored bearer token
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Fetch every note of the current user
    async fn list_notes(&self) -> ApiResult<Vec<Note>>;

    /// Create a note; the response carries the server-assigned id
    async fn create_note(&self, note: &NotePayload) -> ApiResult<CreateNoteResponse>;

    /// Overwrite the note identified by `id`
    async fn update_note(&self, id: i64, note: &NotePayload) -> ApiResult<Value>;

    /// Remove the note identified by `id`
    async fn delete_note(&self, id: i64) -> ApiResult<Value>;
}
