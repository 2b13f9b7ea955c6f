//! Line-oriented front end
//!
//! The shell owns the current route and the view model of the mounted screen.
//! Each input line runs to completion before the next one is read; autosave
//! timers keep running on the runtime in between.

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use common::TokenStore;
use notes_api::{AuthApi, Note, NotesApi};
use notes_auth::Authenticator;
use tracing::warn;

use crate::{
    commands::{self, Command},
    editor::{AUTOSAVE_DELAY, DeleteOutcome, NoteEditor},
    navigation::{NoteParams, Route, Screen},
    note_list::NoteList,
};

/// Interactive session over any API implementation and output sink
pub struct Shell<A: AuthApi + NotesApi + 'static, W: Write> {
    api: Arc<A>,
    auth: Authenticator<A>,
    list: NoteList<A>,
    editor: Option<NoteEditor<A>>,
    route: Route,
    autosave_delay: Duration,
    confirm_delete: bool,
    out: W,
}

impl<A: AuthApi + NotesApi + 'static, W: Write> Shell<A, W> {
    pub fn new(api: Arc<A>, tokens: Arc<dyn TokenStore>, out: W) -> Self {
        Self {
            auth: Authenticator::new(api.clone(), tokens),
            list: NoteList::new(api.clone()),
            api,
            editor: None,
            route: Route::Login,
            autosave_delay: AUTOSAVE_DELAY,
            confirm_delete: false,
            out,
        }
    }

    pub fn with_autosave_delay(mut self, delay: Duration) -> Self {
        self.autosave_delay = delay;
        self
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn editor(&self) -> Option<&NoteEditor<A>> {
        self.editor.as_ref()
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Mount the first screen
    pub async fn start(&mut self, initial: Route) -> io::Result<()> {
        self.navigate(initial).await
    }

    /// Settle the open note before exiting
    ///
    /// Saves an edit still waiting for its autosave and waits for saves
    /// already on their way to the server.
    pub async fn close(&mut self) -> io::Result<()> {
        let Some(editor) = self.editor.as_mut() else {
            return Ok(());
        };

        editor.flush().await;
        if editor.is_dirty() {
            writeln!(self.out, "Unsaved changes to this note were lost")?;
        }
        Ok(())
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        let label = match self.route.screen() {
            Screen::Login => "login",
            Screen::Register => "register",
            Screen::Home => "notes",
            Screen::Note => "note",
        };
        write!(self.out, "{}> ", label)?;
        self.out.flush()
    }

    /// Handle one input line; `Break` means the user quit
    pub async fn handle_line(&mut self, line: &str) -> io::Result<ControlFlow<()>> {
        if self.confirm_delete {
            self.confirm_delete = false;
            let answer = line.trim().to_lowercase();
            if answer == "y" || answer == "yes" {
                self.delete_note().await?;
            } else {
                writeln!(self.out, "Delete cancelled")?;
            }
            return Ok(ControlFlow::Continue(()));
        }

        let command = match commands::parse(line, self.route.screen()) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(ControlFlow::Continue(())),
            Err(e) => {
                writeln!(self.out, "{}", e)?;
                return Ok(ControlFlow::Continue(()));
            }
        };

        self.run(command).await
    }

    async fn run(&mut self, command: Command) -> io::Result<ControlFlow<()>> {
        match command {
            Command::Help => writeln!(self.out, "{}", commands::help(self.route.screen()))?,
            Command::Quit => return Ok(ControlFlow::Break(())),

            Command::Login { username, password } => {
                match self.auth.login(&username, &password).await {
                    Ok(()) => self.navigate(Route::Home).await?,
                    Err(e) => writeln!(self.out, "Login failed: {}", e.message())?,
                }
            }
            Command::Register { username, password } => {
                match self.auth.register(&username, &password).await {
                    Ok(_) => {
                        writeln!(self.out, "Register success")?;
                        self.navigate(Route::Login).await?;
                    }
                    Err(e) => writeln!(self.out, "Register failed: {}", e.message())?,
                }
            }
            Command::GoToLogin => self.navigate(Route::Login).await?,
            Command::GoToRegister => self.navigate(Route::Register).await?,

            Command::List => self.print_list()?,
            Command::Search(search) => {
                self.list.set_search(search);
                self.print_list()?;
            }
            Command::Open(id) => match self.list.select(id) {
                Some(params) => self.navigate(Route::Note(params)).await?,
                None => writeln!(self.out, "No visible note with id {}", id)?,
            },
            Command::New => self.navigate(Route::Note(NoteParams::new_note())).await?,
            Command::Refresh => self.navigate(Route::Home).await?,
            Command::Logout => {
                if let Err(e) = self.auth.logout() {
                    warn!("Failed to log out cleanly: {}", e);
                }
                self.navigate(Route::Login).await?;
            }

            Command::Title(title) => self.with_editor(|editor| editor.set_title(title)),
            Command::Body(body) => self.with_editor(|editor| editor.set_body(body)),
            Command::Pin => self.with_editor(NoteEditor::toggle_pin),
            Command::Calendar => {
                self.with_editor(NoteEditor::open_date_picker);
                writeln!(self.out, "Pick a day with `date YYYY-MM-DD`")?;
            }
            Command::Date(day) => self.with_editor(|editor| editor.pick_date(day)),
            Command::ClearDate => self.with_editor(NoteEditor::clear_date),
            Command::Show => self.print_draft()?,
            Command::Delete => {
                if self.editor.as_ref().is_some_and(|editor| !editor.is_new()) {
                    self.confirm_delete = true;
                    writeln!(self.out, "Delete this note? [y/N]")?;
                } else {
                    writeln!(self.out, "Nothing to delete")?;
                }
            }
            Command::Back => self.navigate(Route::Home).await?,
        }

        Ok(ControlFlow::Continue(()))
    }

    async fn navigate(&mut self, route: Route) -> io::Result<()> {
        // Leaving the note screen unmounts the editor
        self.editor = None;
        self.confirm_delete = false;
        self.route = route.clone();

        match route {
            Route::Login => {
                // Nothing fetched for the previous session survives it
                self.list = NoteList::new(self.api.clone());
                writeln!(self.out, "Log in (or `register` to create an account)")?;
            }
            Route::Register => writeln!(self.out, "Create an account")?,
            Route::Home => {
                self.list.on_focus().await;
                self.print_list()?;
            }
            Route::Note(params) => {
                self.editor = Some(NoteEditor::with_delay(
                    self.api.clone(),
                    &params,
                    self.autosave_delay,
                ));
                self.print_draft()?;
            }
        }

        Ok(())
    }

    async fn delete_note(&mut self) -> io::Result<()> {
        let Some(editor) = self.editor.as_mut() else {
            return Ok(());
        };

        match editor.delete().await {
            Ok(DeleteOutcome::Deleted) => {
                writeln!(self.out, "Note deleted")?;
                self.navigate(Route::Home).await
            }
            Ok(DeleteOutcome::NothingToDelete) => writeln!(self.out, "Nothing to delete"),
            Err(e) => {
                warn!("Failed to delete note: {}", e);
                writeln!(self.out, "Delete failed: {}", e.message())
            }
        }
    }

    fn with_editor(&mut self, apply: impl FnOnce(&mut NoteEditor<A>)) {
        if let Some(editor) = self.editor.as_mut() {
            apply(editor);
        }
    }

    fn print_list(&mut self) -> io::Result<()> {
        let visible = self.list.visible();
        if visible.is_empty() {
            return writeln!(self.out, "No notes");
        }
        for note in visible {
            writeln!(self.out, "{}", format_note_line(note))?;
        }
        Ok(())
    }

    fn print_draft(&mut self) -> io::Result<()> {
        let Some(editor) = self.editor.as_ref() else {
            return Ok(());
        };
        let draft = editor.draft();
        let id = draft
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "new".to_string());
        let date = if draft.date.is_empty() {
            "-"
        } else {
            draft.date.as_str()
        };
        let pin = if draft.pinned { "pinned" } else { "not pinned" };

        writeln!(self.out, "[{}] {} ({}, {})", id, draft.title, date, pin)?;
        writeln!(self.out, "{}", draft.body)
    }
}

fn format_note_line(note: &Note) -> String {
    let mut line = format!("{:>4}  {}", note.id, note.title);
    if let Some(date) = note.date.as_deref().filter(|date| !date.is_empty()) {
        line.push_str(&format!("  {}", date));
    }
    if note.pinned {
        line.push_str("  [pinned]");
    }
    line
}
