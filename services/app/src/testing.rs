//! In-memory stand-in for the notes server

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use notes_api::models::CreatedNote;
use notes_api::{
    ApiError, ApiResult, AuthApi, CreateNoteResponse, Credentials, LoginResponse, Note,
    NotePayload, NotesApi,
};
use serde_json::{Value, json};

/// Operation received by [`FakeApi`], recorded when the call starts
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    Register(String),
    List,
    Create(NotePayload),
    Update(i64, NotePayload),
    Delete(i64),
}

pub struct FakeApi {
    notes: Mutex<Vec<Note>>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicI64,
    save_latency: Duration,
    pub fail_saves: AtomicBool,
    pub fail_lists: AtomicBool,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            notes: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(100),
            save_latency: Duration::ZERO,
            fail_saves: AtomicBool::new(false),
            fail_lists: AtomicBool::new(false),
        }
    }
}

impl FakeApi {
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: Mutex::new(notes),
            ..Self::default()
        }
    }

    /// Saves take `latency` of (virtual) time to complete
    pub fn with_save_latency(latency: Duration) -> Self {
        Self {
            save_latency: latency,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn save_outcome(&self) -> ApiResult<()> {
        if !self.save_latency.is_zero() {
            tokio::time::sleep(self.save_latency).await;
        }
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection reset".to_string()));
        }
        Ok(())
    }
}

pub fn note(id: i64, title: &str, body: &str) -> Note {
    Note {
        id,
        title: title.to_string(),
        body: body.to_string(),
        pinned: false,
        date: None,
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        self.record(Call::Login(credentials.username.clone()));
        if credentials.password != "secret" {
            return Err(ApiError::Server {
                status: 401,
                payload: json!({"message": "Invalid username or password"}),
            });
        }

        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &json!({"exp": u32::MAX}),
            &jsonwebtoken::EncodingKey::from_secret(b"fake"),
        )
        .unwrap();
        Ok(LoginResponse { token })
    }

    async fn register(&self, credentials: &Credentials) -> ApiResult<Value> {
        self.record(Call::Register(credentials.username.clone()));
        if credentials.username == "taken" {
            return Err(ApiError::Server {
                status: 409,
                payload: json!({"message": "Username already exists"}),
            });
        }
        Ok(json!({"message": "User registered"}))
    }
}

#[async_trait]
impl NotesApi for FakeApi {
    async fn list_notes(&self) -> ApiResult<Vec<Note>> {
        self.record(Call::List);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(ApiError::Unknown("Failed to fetch notes".to_string()));
        }
        Ok(self.notes.lock().unwrap().clone())
    }

    async fn create_note(&self, payload: &NotePayload) -> ApiResult<CreateNoteResponse> {
        self.record(Call::Create(payload.clone()));
        self.save_outcome().await?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(CreateNoteResponse {
            note: Some(CreatedNote { id }),
        })
    }

    async fn update_note(&self, id: i64, payload: &NotePayload) -> ApiResult<Value> {
        self.record(Call::Update(id, payload.clone()));
        self.save_outcome().await?;
        Ok(json!({"message": "updated"}))
    }

    async fn delete_note(&self, id: i64) -> ApiResult<Value> {
        self.record(Call::Delete(id));
        self.notes.lock().unwrap().retain(|note| note.id != id);
        Ok(Value::Null)
    }
}
