//! Portfolio command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::{context, output};

#[derive(Args, Debug)]
pub struct PortfolioArgs {}

pub async fn run(_args: PortfolioArgs, global: &GlobalArgs) -> Result<()> {
    let mut client = context::open(global)?;

    let portfolio = client
        .portfolio()
        .await
        .context("Failed to fetch portfolio")?;

    output::json_pretty(&portfolio)?;

    context::finish(client);
    Ok(())
}
