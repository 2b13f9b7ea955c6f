//! Note list with client-side search

use std::sync::Arc;

use notes_api::{Note, NotesApi};
use tracing::{info, warn};

use crate::navigation::NoteParams;

/// Notes whose title or body contains `search`, ignoring case
///
/// An empty search matches everything. Filtering an already filtered list
/// with the same search returns it unchanged.
pub fn filter_notes(notes: &[Note], search: &str) -> Vec<Note> {
    let needle = search.to_lowercase();
    notes
        .iter()
        .filter(|note| matches_search(note, &needle))
        .cloned()
        .collect()
}

fn matches_search(note: &Note, needle: &str) -> bool {
    note.title.to_lowercase().contains(needle) || note.body.to_lowercase().contains(needle)
}

/// View model of the home screen
pub struct NoteList<A> {
    api: Arc<A>,
    notes: Vec<Note>,
    search: String,
}

impl<A: NotesApi> NoteList<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            notes: Vec::new(),
            search: String::new(),
        }
    }

    /// Reload the full list; called every time the screen regains focus
    ///
    /// A failed fetch is logged and the previous list kept.
    pub async fn on_focus(&mut self) {
        match self.api.list_notes().await {
            Ok(notes) => {
                info!("Fetched {} notes", notes.len());
                self.notes = notes;
            }
            Err(e) => warn!("Failed to fetch notes: {}", e),
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Everything fetched on the last focus, unfiltered
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Notes matching the current search, in server order
    pub fn visible(&self) -> Vec<&Note> {
        let needle = self.search.to_lowercase();
        self.notes
            .iter()
            .filter(|note| matches_search(note, &needle))
            .collect()
    }

    /// Editor parameters for a visible note
    pub fn select(&self, id: i64) -> Option<NoteParams> {
        self.visible()
            .into_iter()
            .find(|note| note.id == id)
            .map(NoteParams::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi, note};
    use std::sync::atomic::Ordering;

    fn sample() -> Vec<Note> {
        vec![
            note(1, "Groceries", "Milk, eggs"),
            note(2, "Ideas", "Rewrite the GROCERY app"),
            note(3, "Trip", "Pack bags"),
        ]
    }

    #[test]
    fn test_filter_matches_title_or_body_case_insensitive() {
        let notes = sample();
        let ids = |found: Vec<Note>| found.iter().map(|n| n.id).collect::<Vec<_>>();

        assert_eq!(ids(filter_notes(&notes, "grocer")), vec![1, 2]);
        assert_eq!(ids(filter_notes(&notes, "EGGS")), vec![1]);
        assert_eq!(ids(filter_notes(&notes, "")), vec![1, 2, 3]);
        assert!(filter_notes(&notes, "nothing").is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let notes = sample();
        for search in ["", "a", "GROC", "bags", "zzz"] {
            let once = filter_notes(&notes, search);
            let twice = filter_notes(&once, search);
            assert_eq!(once, twice, "search {:?}", search);
        }
    }

    #[tokio::test]
    async fn test_focus_refetches_every_time() {
        let api = Arc::new(FakeApi::with_notes(sample()));
        let mut list = NoteList::new(api.clone());
        assert!(list.notes().is_empty());

        list.on_focus().await;
        list.on_focus().await;
        assert_eq!(list.notes().len(), 3);
        assert_eq!(api.calls(), vec![Call::List, Call::List]);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_stale_list() {
        let api = Arc::new(FakeApi::with_notes(sample()));
        let mut list = NoteList::new(api.clone());
        list.on_focus().await;

        api.fail_lists.store(true, Ordering::SeqCst);
        list.on_focus().await;
        assert_eq!(list.notes().len(), 3);
    }

    #[tokio::test]
    async fn test_select_forwards_visible_note() {
        let api = Arc::new(FakeApi::with_notes(sample()));
        let mut list = NoteList::new(api);
        list.on_focus().await;
        list.set_search("trip");

        assert_eq!(list.visible().len(), 1);
        let params = list.select(3).expect("Trip should be visible");
        assert_eq!(params.note_id, Some(3));
        assert_eq!(params.note_title.as_deref(), Some("Trip"));
        assert_eq!(params.note.as_deref(), Some("Pack bags"));
        assert_eq!(params.mark, Some(false));

        // Filtered out notes cannot be selected
        assert_eq!(list.select(1), None);
    }
}
