//! Client construction from the global options.

use anyhow::{Context, Result};
use tracing::warn;

use iol::{Config, IolClient, MemoryTokenStore};

use crate::cli::GlobalArgs;
use crate::output;

/// Resolve configuration, applying command-line overrides.
pub fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.env_file {
        Some(path) => Config::from_env_file(path),
        None => Config::from_env(),
    }
    .context("Failed to load configuration")?;

    if let Some(path) = &global.token_file {
        config.token_file = path.clone();
    }

    Ok(config)
}

/// Open a client for the configured account.
pub fn open(global: &GlobalArgs) -> Result<IolClient> {
    let config = load_config(global)?;

    let client = if global.no_persist {
        IolClient::with_store(config.credentials, MemoryTokenStore::new(), config.timeout)
    } else {
        IolClient::new(config)
    };

    client.context("Failed to create client")
}

/// Close a client; a token file that cannot be written is only a warning.
pub fn finish(client: IolClient) {
    if let Err(e) = client.close() {
        warn!(error = %e, "Failed to save token");
        output::warning(&format!("Token not saved: {}", e));
    }
}
