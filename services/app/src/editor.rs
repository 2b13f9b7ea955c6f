//! Note editor with debounced autosave
//!
//! Every edit bumps a revision and restarts a single timer. When the timer
//! fires and the draft is still dirty, the editor sends the draft as it is at
//! that moment: a create while the note has no id, an update afterwards.
//!
//! Superseding the timer never cancels a save that was already dispatched, so
//! two saves may be in flight at once. Responses are applied in completion
//! order; the revision only decides whether the draft is still dirty.
//! [`NoteEditor::flush`] settles everything before the program exits.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;
use notes_api::{ApiResult, NotePayload, NotesApi};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::navigation::NoteParams;

/// Quiet period after the last edit before the draft is saved
pub const AUTOSAVE_DELAY: Duration = Duration::from_secs(1);

/// Format of the calendar day stored on a note
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field values being edited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// Server id, absent until the first create succeeds
    pub id: Option<i64>,
    pub title: String,
    pub body: String,
    pub pinned: bool,
    /// Calendar day, empty when unset
    pub date: String,
}

impl Draft {
    pub fn from_params(params: &NoteParams) -> Self {
        Self {
            id: params.note_id,
            title: params.note_title.clone().unwrap_or_default(),
            body: params.note.clone().unwrap_or_default(),
            pinned: params.mark.unwrap_or(false),
            date: params.note_date.clone().unwrap_or_default(),
        }
    }

    pub fn payload(&self) -> NotePayload {
        NotePayload::new(
            self.title.clone(),
            self.body.clone(),
            self.pinned,
            self.date.clone(),
        )
    }
}

#[derive(Debug, Default)]
struct EditorState {
    draft: Draft,
    /// Bumped on every edit
    revision: u64,
    /// Highest revision the server has acknowledged
    saved_revision: u64,
    picker_open: bool,
}

impl EditorState {
    fn is_dirty(&self) -> bool {
        self.revision > self.saved_revision
    }
}

/// Result of [`NoteEditor::delete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The server removed the note; the caller should navigate back
    Deleted,
    /// The note was never saved, nothing was sent
    NothingToDelete,
}

/// View model of the note screen
///
/// Must be used from within a tokio runtime: edits spawn the autosave timer.
/// Dropping the editor cancels a pending timer but not a dispatched save.
pub struct NoteEditor<A: NotesApi + 'static> {
    api: Arc<A>,
    state: Arc<Mutex<EditorState>>,
    delay: Duration,
    timer: Option<JoinHandle<()>>,
    /// Saves dispatched by the timer, pruned as new ones start
    in_flight: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl<A: NotesApi + 'static> NoteEditor<A> {
    /// Open the editor with the default one second autosave delay
    pub fn new(api: Arc<A>, params: &NoteParams) -> Self {
        Self::with_delay(api, params, AUTOSAVE_DELAY)
    }

    pub fn with_delay(api: Arc<A>, params: &NoteParams, delay: Duration) -> Self {
        let state = EditorState {
            draft: Draft::from_params(params),
            ..EditorState::default()
        };

        Self {
            api,
            state: Arc::new(Mutex::new(state)),
            delay,
            timer: None,
            in_flight: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of the current field values
    pub fn draft(&self) -> Draft {
        lock(&self.state).draft.clone()
    }

    pub fn id(&self) -> Option<i64> {
        lock(&self.state).draft.id
    }

    pub fn is_new(&self) -> bool {
        self.id().is_none()
    }

    /// Whether some edit has not been acknowledged by the server yet
    pub fn is_dirty(&self) -> bool {
        lock(&self.state).is_dirty()
    }

    /// Whether the autosave timer is armed
    pub fn has_pending_save(&self) -> bool {
        self.timer
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    pub fn is_date_picker_open(&self) -> bool {
        lock(&self.state).picker_open
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.edit(move |draft| draft.title = title);
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        let body = body.into();
        self.edit(move |draft| draft.body = body);
    }

    pub fn toggle_pin(&mut self) {
        self.edit(|draft| draft.pinned = !draft.pinned);
    }

    pub fn open_date_picker(&mut self) {
        lock(&self.state).picker_open = true;
    }

    pub fn close_date_picker(&mut self) {
        lock(&self.state).picker_open = false;
    }

    /// Set the note's day and close the picker
    pub fn pick_date(&mut self, day: NaiveDate) {
        let date = day.format(DATE_FORMAT).to_string();
        self.edit(move |draft| draft.date = date);
        self.close_date_picker();
    }

    pub fn clear_date(&mut self) {
        self.edit(|draft| draft.date.clear());
    }

    /// Delete the note on the server
    ///
    /// A note without an id was never saved: nothing is sent.
    pub async fn delete(&mut self) -> ApiResult<DeleteOutcome> {
        let Some(id) = self.id() else {
            debug!("Delete ignored for unsaved note");
            return Ok(DeleteOutcome::NothingToDelete);
        };

        self.api.delete_note(id).await?;
        info!("Note {} deleted", id);

        // The screen is about to close
        self.cancel_timer();
        Ok(DeleteOutcome::Deleted)
    }

    /// Save a pending edit right away and wait for every dispatched save
    ///
    /// Used on exit, where the runtime would otherwise drop both. The draft
    /// is still dirty afterwards only if the server rejected it.
    pub async fn flush(&mut self) {
        self.cancel_timer();

        let dispatched: Vec<_> = lock(&self.in_flight).drain(..).collect();
        for handle in dispatched {
            if let Err(e) = handle.await {
                warn!("Autosave task failed: {}", e);
            }
        }

        save(self.api.clone(), self.state.clone()).await;
    }

    fn edit(&mut self, apply: impl FnOnce(&mut Draft)) {
        {
            let mut state = lock(&self.state);
            apply(&mut state.draft);
            state.revision += 1;
        }
        self.schedule_save();
    }

    fn schedule_save(&mut self) {
        self.cancel_timer();

        let api = self.api.clone();
        let state = self.state.clone();
        let in_flight = self.in_flight.clone();
        let delay = self.delay;

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached so that cancelling this timer never cancels the request
            let handle = tokio::spawn(save(api, state));
            let mut in_flight = lock(&in_flight);
            in_flight.retain(|save| !save.is_finished());
            in_flight.push(handle);
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<A: NotesApi + 'static> Drop for NoteEditor<A> {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn save<A: NotesApi>(api: Arc<A>, state: Arc<Mutex<EditorState>>) {
    let (id, payload, revision) = {
        let guard = lock(&state);
        if !guard.is_dirty() {
            debug!("Draft is clean, nothing to save");
            return;
        }
        (guard.draft.id, guard.draft.payload(), guard.revision)
    };

    match id {
        Some(id) => match api.update_note(id, &payload).await {
            Ok(_) => {
                mark_saved(&state, revision);
                info!("Note {} saved", id);
            }
            Err(e) => warn!("Failed to save note {}: {}", id, e),
        },
        None => match api.create_note(&payload).await {
            Ok(response) => {
                mark_saved(&state, revision);
                let mut guard = lock(&state);
                match response.id() {
                    Some(id) if guard.draft.id.is_none() => {
                        guard.draft.id = Some(id);
                        info!("Note created with id {}", id);
                    }
                    Some(id) => debug!("Ignoring id {} from overlapping create", id),
                    None => warn!("Create response carried no note id"),
                }
            }
            Err(e) => warn!("Failed to create note: {}", e),
        },
    }
}

fn mark_saved(state: &Mutex<EditorState>, revision: u64) {
    let mut guard = lock(state);
    guard.saved_revision = guard.saved_revision.max(revision);
}
