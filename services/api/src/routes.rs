//! REST endpoints consumed by the client

use reqwest::Method;

/// One REST operation of the notes server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    ListNotes,
    CreateNote,
    UpdateNote(i64),
    DeleteNote(i64),
}

impl Endpoint {
    /// HTTP method of the operation
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Login | Endpoint::Register | Endpoint::CreateNote => Method::POST,
            Endpoint::ListNotes => Method::GET,
            Endpoint::UpdateNote(_) => Method::PUT,
            Endpoint::DeleteNote(_) => Method::DELETE,
        }
    }

    /// Path relative to the API base URL
    ///
    /// Single notes are written under `/note` but deleted under `/notes`.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "/auth/login".to_string(),
            Endpoint::Register => "/auth/register".to_string(),
            Endpoint::ListNotes => "/notes".to_string(),
            Endpoint::CreateNote => "/note".to_string(),
            Endpoint::UpdateNote(id) => format!("/note/{}", id),
            Endpoint::DeleteNote(id) => format!("/notes/{}", id),
        }
    }

    /// Whether the bearer header is attached
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Endpoint::Login | Endpoint::Register)
    }

    /// Message used when a failure carries nothing better
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Endpoint::Login => "Failed to log in",
            Endpoint::Register => "Failed to register",
            Endpoint::ListNotes => "Failed to fetch notes",
            Endpoint::CreateNote => "Failed to add note",
            Endpoint::UpdateNote(_) => "Failed to update note",
            Endpoint::DeleteNote(_) => "Failed to delete note",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_table() {
        let table = [
            (Endpoint::Login, Method::POST, "/auth/login", false),
            (Endpoint::Register, Method::POST, "/auth/register", false),
            (Endpoint::ListNotes, Method::GET, "/notes", true),
            (Endpoint::CreateNote, Method::POST, "/note", true),
            (Endpoint::UpdateNote(7), Method::PUT, "/note/7", true),
            (Endpoint::DeleteNote(7), Method::DELETE, "/notes/7", true),
        ];

        for (endpoint, method, path, auth) in table {
            assert_eq!(endpoint.method(), method, "{:?}", endpoint);
            assert_eq!(endpoint.path(), path, "{:?}", endpoint);
            assert_eq!(endpoint.requires_auth(), auth, "{:?}", endpoint);
        }
    }
}
