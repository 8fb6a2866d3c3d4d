//! iol - command-line client for the InvertirOnline API.
//!
//! This is a thin wrapper over the `iol` library. Credentials come from the
//! environment or a `.env` file; tokens are kept in `tokens.json` between runs.

mod cli;
mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.global.verbose, cli.global.json_logs);

    let result = commands::handle(cli.command, &cli.global).await;
    if let Err(e) = &result {
        if is_auth_failure(e) {
            output::warning("Check IOL_USERNAME and IOL_PASSWORD, then run `iol login`");
        }
    }
    result
}

/// Returns true if an authentication failure is anywhere in the error chain.
fn is_auth_failure(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<iol::Error>())
        .any(iol::Error::is_auth)
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
