//! HTTP client for the notes REST API

use std::sync::Arc;

use async_trait::async_trait;
use common::TokenStore;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{CreateNoteResponse, Credentials, LoginResponse, Note, NotePayload},
    routes::Endpoint,
    service::{AuthApi, NotesApi},
};

/// Stateless wrapper around the six REST operations
///
/// The only state consulted per call is the token store, read fresh before
/// every authenticated request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            tokens,
        }
    }

    /// Base URL every endpoint path is appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<B, T>(&self, endpoint: Endpoint, body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let fallback = endpoint.fallback_message();
        let url = format!("{}{}", self.base_url, endpoint.path());
        let mut request = self.http.request(endpoint.method(), &url);

        if endpoint.requires_auth() {
            let token = self.tokens.get().map_err(|e| {
                warn!("Failed to read session token: {}", e);
                ApiError::Unknown(fallback.to_string())
            })?;
            // No token is not an error here: the server rejects the call
            if let Some(token) = token {
                request = request.bearer_auth(token);
            }
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        debug!("{} {}", endpoint.method(), url);

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(e.to_string(), fallback))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(e.to_string(), fallback))?;

        if !status.is_success() {
            debug!("{} {} failed with {}", endpoint.method(), url, status);
            return Err(error_from_response(status.as_u16(), &bytes));
        }

        decode_body(&bytes)
    }
}

fn transport_error(message: String, fallback: &str) -> ApiError {
    if message.is_empty() {
        ApiError::Unknown(fallback.to_string())
    } else {
        ApiError::Transport(message)
    }
}

/// Prefer whatever the server sent; an empty body leaves only the status
fn error_from_response(status: u16, body: &[u8]) -> ApiError {
    let text = String::from_utf8_lossy(body);
    if text.trim().is_empty() {
        return ApiError::Transport(format!("Request failed with status code {}", status));
    }

    let payload = serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.into_owned()));
    ApiError::Server { status, payload }
}

/// An empty success body decodes as JSON `null`
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    let decoded = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(body)
    };

    decoded.map_err(|e| ApiError::Transport(format!("Invalid response body: {}", e)))
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        self.call(Endpoint::Login, Some(credentials)).await
    }

    async fn register(&self, credentials: &Credentials) -> ApiResult<Value> {
        self.call(Endpoint::Register, Some(credentials)).await
    }
}

#[async_trait]
impl NotesApi for ApiClient {
    async fn list_notes(&self) -> ApiResult<Vec<Note>> {
        self.call(Endpoint::ListNotes, None::<&()>).await
    }

    async fn create_note(&self, note: &NotePayload) -> ApiResult<CreateNoteResponse> {
        self.call(Endpoint::CreateNote, Some(note)).await
    }

    async fn update_note(&self, id: i64, note: &NotePayload) -> ApiResult<Value> {
        self.call(Endpoint::UpdateNote(id), Some(note)).await
    }

    async fn delete_note(&self, id: i64) -> ApiResult<Value> {
        self.call(Endpoint::DeleteNote(id), None::<&()>).await
    }
}
