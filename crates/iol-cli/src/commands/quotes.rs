//! Quote panel command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use iol::api::Quote;

use crate::cli::GlobalArgs;
use crate::{context, output};

#[derive(Args, Debug)]
pub struct QuotesArgs {
    /// Instrument type (e.g., ACCIONES, BONOS, OPCIONES, CEDEARS)
    #[arg(long, default_value = "ACCIONES")]
    pub instrument: String,

    /// Country
    #[arg(long, default_value = "ARGENTINA")]
    pub country: String,

    /// Panel name
    #[arg(long, default_value = "Todos")]
    pub panel: String,

    /// Print the panel as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: QuotesArgs, global: &GlobalArgs) -> Result<()> {
    let mut client = context::open(global)?;

    eprintln!(
        "{}",
        format!("Fetching {} in {}...", args.instrument, args.country).dimmed()
    );

    let panel = client
        .quotes(&args.instrument, &args.country, &args.panel)
        .await
        .context("Failed to fetch quotes")?;

    if args.json {
        output::json_pretty(&panel)?;
    } else if panel.quotes.is_empty() {
        output::warning("No instruments found for this panel.");
    } else {
        for quote in &panel.quotes {
            print_quote(quote);
        }
    }

    context::finish(client);
    Ok(())
}

fn print_quote(quote: &Quote) {
    println!();
    output::optional_field("Symbol", quote.symbol.as_deref().map(|s| s.bold()));
    output::optional_field("Description", quote.description.as_deref());
    output::optional_field("Last price", quote.last_price);
    output::optional_field("Change %", quote.change_percent);
    output::optional_field("Open", quote.open);
    output::optional_field("High", quote.high);
    output::optional_field("Low", quote.low);
    output::optional_field("Previous close", quote.previous_close);
    output::optional_field("Volume", quote.volume);
    output::optional_field("Trades", quote.trades);
    output::optional_field("Option type", quote.option_type.as_deref());
    output::optional_field("Strike price", quote.strike_price);
    output::optional_field("Expiry", quote.expiry_date.as_deref());
    output::optional_field("Market", quote.market.as_deref());
    output::optional_field("Currency", quote.currency.as_deref());

    if let Some(best) = &quote.best {
        output::field("Best bid", &format!("{} x {}", fmt(best.bid_price), fmt(best.bid_size)));
        output::field("Best ask", &format!("{} x {}", fmt(best.ask_price), fmt(best.ask_size)));
    }
}

fn fmt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
