use std::sync::Arc;

use anyhow::Result;
use common::{ClientConfig, FileTokenStore, TokenStore, telemetry};
use notes_api::ApiClient;
use notes_app::{Route, Shell};
use notes_auth::SessionGate;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ClientConfig::load()?;

    // Initialize logging
    telemetry::init(&config.log_level)?;

    info!("Starting notes client against {}", config.api_url);

    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.token_path));
    let api = Arc::new(ApiClient::new(config.api_url.clone(), tokens.clone()));

    // Decide the first screen from the stored session
    let session = SessionGate::new(tokens.clone()).check();
    info!("Initial session state: {:?}", session);

    let mut shell = Shell::new(api, tokens, std::io::stdout())
        .with_autosave_delay(config.autosave_delay());
    shell.start(Route::from(session)).await?;
    shell.prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if shell.handle_line(&line).await?.is_break() {
            break;
        }
        shell.prompt()?;
    }

    // Quit or end of input: do not let the runtime drop a pending save
    shell.close().await?;

    info!("Notes client stopped");
    Ok(())
}
