//! Account state command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::{context, output};

#[derive(Args, Debug)]
pub struct AccountArgs {}

pub async fn run(_args: AccountArgs, global: &GlobalArgs) -> Result<()> {
    let mut client = context::open(global)?;

    let state = client
        .account_state()
        .await
        .context("Failed to fetch account state")?;

    output::json_pretty(&state)?;

    context::finish(client);
    Ok(())
}
