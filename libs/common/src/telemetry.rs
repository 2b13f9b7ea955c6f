//! Tracing setup shared by the binaries

use anyhow::Result;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global fmt subscriber
///
/// `RUST_LOG` takes precedence over `default_level`. Output goes to stderr so
/// logs never interleave with the shell's own stdout.
pub fn init(default_level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("setting default subscriber failed: {}", e))?;

    Ok(())
}
