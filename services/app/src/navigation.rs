//! Screens of the client and the parameters passed between them

use notes_api::Note;
use notes_auth::SessionState;
use serde::{Deserialize, Serialize};

/// Parameters handed to the editor screen
///
/// Every field is optional; without `note_id` the editor opens a new note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteParams {
    pub note_id: Option<i64>,
    pub note_title: Option<String>,
    pub note_date: Option<String>,
    pub note: Option<String>,
    pub mark: Option<bool>,
}

impl NoteParams {
    /// Parameters for a blank note
    pub fn new_note() -> Self {
        Self::default()
    }

    pub fn is_new(&self) -> bool {
        self.note_id.is_none()
    }
}

impl From<&Note> for NoteParams {
    fn from(note: &Note) -> Self {
        Self {
            note_id: Some(note.id),
            note_title: Some(note.title.clone()),
            note_date: note.date.clone(),
            note: Some(note.body.clone()),
            mark: Some(note.pinned),
        }
    }
}

/// A screen together with its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    Note(NoteParams),
}

/// Screen kind, without parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Home,
    Note,
}

impl Route {
    pub fn screen(&self) -> Screen {
        match self {
            Route::Login => Screen::Login,
            Route::Register => Screen::Register,
            Route::Home => Screen::Home,
            Route::Note(_) => Screen::Note,
        }
    }
}

impl From<SessionState> for Route {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Authenticated => Route::Home,
            SessionState::Unauthenticated => Route::Login,
        }
    }
}
