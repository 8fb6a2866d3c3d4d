//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::GlobalArgs;
use crate::{context, output};

#[derive(Args, Debug)]
pub struct LoginArgs {}

pub async fn run(_args: LoginArgs, global: &GlobalArgs) -> Result<()> {
    let mut client = context::open(global)?;

    eprintln!("{}", "Logging in...".dimmed());

    let expires_at = client
        .authenticate()
        .await
        .context("Failed to login")?
        .expires_at;

    output::success("Logged in successfully");
    println!();
    output::field("User", client.session().credentials().username());
    output::field("API", &client.session().credentials().api_url().to_string());
    output::field("Expires", &expires_at.to_rfc3339());

    context::finish(client);
    Ok(())
}
