//! Notes client application layer
//!
//! View models for the three authenticated-area screens plus the shell that
//! drives them from typed commands:
//!
//! - [`note_list`]: home screen, refetch on focus and client-side search
//! - [`editor`]: note screen, debounced autosave
//! - [`navigation`]: routes and the parameters handed to the editor
//! - [`shell`] and [`commands`]: the line-oriented front end

pub mod commands;
pub mod editor;
pub mod navigation;
pub mod note_list;
pub mod shell;

#[cfg(test)]
mod testing;

pub use editor::{DeleteOutcome, Draft, NoteEditor};
pub use navigation::{NoteParams, Route, Screen};
pub use note_list::{NoteList, filter_notes};
pub use shell::Shell;
