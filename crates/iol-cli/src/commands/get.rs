//! Raw GET command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::{GlobalArgs, parse_key_value};
use crate::{context, output};

#[derive(Args, Debug)]
pub struct GetArgs {
    /// API path (e.g., /api/v2/estadocuenta)
    pub path: String,

    /// Query parameter, repeatable (e.g., --query filtro.estado=todas)
    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub query: Vec<(String, String)>,
}

pub async fn run(args: GetArgs, global: &GlobalArgs) -> Result<()> {
    let mut client = context::open(global)?;

    let body = client
        .get_with_query(&args.path, &args.query)
        .await
        .with_context(|| format!("GET {} failed", args.path))?;

    output::json_pretty(&body)?;

    context::finish(client);
    Ok(())
}
