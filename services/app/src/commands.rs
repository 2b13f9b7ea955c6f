//! Shell commands, one per user interaction

use chrono::NaiveDate;
use thiserror::Error;

use crate::editor::DATE_FORMAT;
use crate::navigation::Screen;

/// Interaction the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    // Login and register screens
    Login { username: String, password: String },
    Register { username: String, password: String },
    GoToLogin,
    GoToRegister,
    // Home screen
    List,
    Search(String),
    Open(i64),
    New,
    Refresh,
    Logout,
    // Note screen
    Title(String),
    Body(String),
    Pin,
    Calendar,
    Date(NaiveDate),
    ClearDate,
    Show,
    Delete,
    Back,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command: {0} (type `help`)")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid note id: {0}")]
    InvalidId(String),

    #[error("Invalid date {0}, expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Parse one input line in the context of the current screen
///
/// Returns `Ok(None)` for a blank line.
pub fn parse(line: &str, screen: Screen) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match (screen, word) {
        (_, "help") => Command::Help,
        (_, "quit" | "exit") => Command::Quit,

        (Screen::Login, "login") => {
            let (username, password) = credentials(rest)?;
            Command::Login { username, password }
        }
        (Screen::Login, "register") => Command::GoToRegister,
        (Screen::Register, "register") => {
            let (username, password) = credentials(rest)?;
            Command::Register { username, password }
        }
        (Screen::Register, "login") => Command::GoToLogin,

        (Screen::Home, "list") => Command::List,
        (Screen::Home, "search") => Command::Search(rest.to_string()),
        (Screen::Home, "open") => Command::Open(note_id(rest)?),
        (Screen::Home, "new") => Command::New,
        (Screen::Home, "refresh") => Command::Refresh,
        (Screen::Home, "logout") => Command::Logout,

        (Screen::Note, "title") => Command::Title(rest.to_string()),
        (Screen::Note, "body") => Command::Body(rest.to_string()),
        (Screen::Note, "pin") => Command::Pin,
        (Screen::Note, "calendar") => Command::Calendar,
        (Screen::Note, "date") if rest.is_empty() => Command::ClearDate,
        (Screen::Note, "date") => Command::Date(
            NaiveDate::parse_from_str(rest, DATE_FORMAT)
                .map_err(|_| ParseError::InvalidDate(rest.to_string()))?,
        ),
        (Screen::Note, "show") => Command::Show,
        (Screen::Note, "delete") => Command::Delete,
        (Screen::Note, "back") => Command::Back,

        _ => return Err(ParseError::Unknown(word.to_string())),
    };

    Ok(Some(command))
}

/// `<username> <password>`; the password may contain spaces
fn credentials(rest: &str) -> Result<(String, String), ParseError> {
    let (username, password) = rest
        .split_once(char::is_whitespace)
        .ok_or(ParseError::MissingArgument("password"))?;
    if username.is_empty() {
        return Err(ParseError::MissingArgument("username"));
    }
    Ok((username.to_string(), password.trim().to_string()))
}

fn note_id(rest: &str) -> Result<i64, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingArgument("note id"));
    }
    rest.parse()
        .map_err(|_| ParseError::InvalidId(rest.to_string()))
}

/// Commands available on `screen`
pub fn help(screen: Screen) -> &'static str {
    match screen {
        Screen::Login => "login <username> <password> | register | quit",
        Screen::Register => "register <username> <password> | login | quit",
        Screen::Home => "list | search [text] | open <id> | new | refresh | logout | quit",
        Screen::Note => {
            "title <text> | body <text> | pin | calendar | date [YYYY-MM-DD] | show | delete | back | quit"
        }
    }
}
