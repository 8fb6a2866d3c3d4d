//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::{context, output};

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, global: &GlobalArgs) -> Result<()> {
    let mut client = context::open(global)?;

    client.logout().context("Failed to remove stored token")?;

    output::success("Logged out");

    context::finish(client);
    Ok(())
}
