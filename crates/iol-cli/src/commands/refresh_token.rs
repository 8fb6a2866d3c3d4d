//! Refresh token command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::GlobalArgs;
use crate::{context, output};

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(_args: RefreshTokenArgs, global: &GlobalArgs) -> Result<()> {
    let mut client = context::open(global)?;

    eprintln!("{}", "Refreshing token...".dimmed());

    let expires_at = client
        .refresh()
        .await
        .context("Failed to refresh token")?
        .expires_at;

    output::success("Token refreshed successfully");
    output::field("Expires", &expires_at.to_rfc3339());

    context::finish(client);
    Ok(())
}
