//! Session token storage
//!
//! The client persists exactly one value: the raw bearer token returned by a
//! successful login. Everything that needs it (the API client, the session
//! gate, the login/logout flows) receives a [`TokenStore`] instead of reaching
//! for global state, so tests can swap in [`MemoryTokenStore`].

use std::fmt::Debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Single-slot key-value store for the session token
pub trait TokenStore: Debug + Send + Sync {
    /// Read the stored token, `None` when logged out
    fn get(&self) -> StoreResult<Option<String>>;

    /// Replace the stored token
    fn set(&self, token: &str) -> StoreResult<()>;

    /// Remove the stored token; clearing an empty store is not an error
    fn clear(&self) -> StoreResult<()>;
}

/// Process-local token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> StoreResult<Option<String>> {
        let token = self.token.read().map_err(|_| StoreError::Poisoned)?;
        Ok(token.clone())
    }

    fn set(&self, token: &str) -> StoreResult<()> {
        let mut slot = self.token.write().map_err(|_| StoreError::Poisoned)?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        let mut slot = self.token.write().map_err(|_| StoreError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}

/// Token store backed by a single file holding the raw token
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store persisting to `path`; the file is created on first `set`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> StoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, token: &str) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, token)?;
        debug!("Token written to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Token removed from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
