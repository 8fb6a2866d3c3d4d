//! Raw POST command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::{GlobalArgs, parse_key_value};
use crate::{context, output};

#[derive(Args, Debug)]
pub struct PostArgs {
    /// API path (e.g., /api/v2/operar/Comprar)
    pub path: String,

    /// Form field, repeatable (e.g., --field simbolo=GGAL)
    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_key_value, conflicts_with = "json")]
    pub field: Vec<(String, String)>,

    /// JSON request body, sent instead of form fields
    #[arg(long, value_name = "BODY")]
    pub json: Option<String>,
}

pub async fn run(args: PostArgs, global: &GlobalArgs) -> Result<()> {
    let body = args
        .json
        .as_deref()
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .context("Invalid JSON body")?;

    let mut client = context::open(global)?;

    let response = match &body {
        Some(body) => client.post_json(&args.path, body).await,
        None => client.post(&args.path, &args.field).await,
    }
    .with_context(|| format!("POST {} failed", args.path))?;

    output::json_pretty(&response)?;

    context::finish(client);
    Ok(())
}
