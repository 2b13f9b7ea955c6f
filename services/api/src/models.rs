//! API models for request and response payloads
//!
//! Field names follow the server's wire format through `serde` renames; the
//! Rust side uses `body`, `pinned` and `date` throughout.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Note as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "note", default)]
    pub body: String,
    #[serde(rename = "mark", default)]
    pub pinned: bool,
    #[serde(rename = "note_date", default)]
    pub date: Option<String>,
}

/// Request body for creating or updating a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePayload {
    pub title: String,
    #[serde(rename = "note")]
    pub body: String,
    #[serde(rename = "mark")]
    pub pinned: bool,
    /// Calendar day, empty when no date is set
    #[serde(rename = "noteDate")]
    pub date: String,
}

impl NotePayload {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        pinned: bool,
        date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            pinned,
            date: date.into(),
        }
    }
}

/// Username/password pair for login and registration
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response for a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Response for a successful note creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteResponse {
    #[serde(default)]
    pub note: Option<CreatedNote>,
}

/// The part of the created note the client cares about
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedNote {
    pub id: i64,
}

impl CreateNoteResponse {
    /// Server-assigned id, if the response carried one
    pub fn id(&self) -> Option<i64> {
        self.note.as_ref().map(|note| note.id)
    }
}
