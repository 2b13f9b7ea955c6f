//! Client configuration
//!
//! Settings are layered: built-in defaults, then an optional `notes.toml` in
//! the working directory, then `NOTES_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// API base URL used when nothing overrides it
pub const DEFAULT_API_URL: &str = match option_env!("NOTES_API_URL") {
    Some(url) => url,
    None => "http://localhost:3000/api",
};

/// Quiet period before the editor saves a draft
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 1000;

/// Configuration for the notes client
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub api_url: String,
    /// File holding the persisted session token
    pub token_path: PathBuf,
    /// Autosave debounce in milliseconds
    pub autosave_delay_ms: u64,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl ClientConfig {
    /// Load the configuration from defaults, `notes.toml` and the environment
    ///
    /// # Environment Variables
    /// - `NOTES_API_URL`: API base URL
    /// - `NOTES_TOKEN_PATH`: token file location
    /// - `NOTES_AUTOSAVE_DELAY_MS`: autosave debounce (default: 1000)
    /// - `NOTES_LOG_LEVEL`: log filter (default: "info")
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default(
                "token_path",
                default_token_path().to_string_lossy().into_owned(),
            )?
            .set_default("autosave_delay_ms", DEFAULT_AUTOSAVE_DELAY_MS as i64)?
            .set_default("log_level", "info")?
            .add_source(
                File::with_name("notes.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("NOTES").try_parsing(true))
            .build()?;

        config.try_deserialize()
    }

    /// Autosave debounce as a [`Duration`]
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_path: default_token_path(),
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS,
            log_level: "info".to_string(),
        }
    }
}

fn default_token_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("notes").join("token"))
        .unwrap_or_else(|| PathBuf::from(".notes-token"))
}
