//! Subcommand implementations.

mod account;
mod get;
mod login;
mod logout;
mod portfolio;
mod post;
mod quotes;
mod refresh_token;
mod status;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::GlobalArgs;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Authenticate with username and password
    Login(login::LoginArgs),

    /// Refresh the stored token
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// Show the stored token state without contacting the API
    Status(status::StatusArgs),

    /// Delete the stored token
    Logout(logout::LogoutArgs),

    /// Authenticated GET against an API path
    Get(get::GetArgs),

    /// Authenticated POST against an API path
    Post(post::PostArgs),

    /// Show the account state (estadocuenta)
    Account(account::AccountArgs),

    /// Show the portfolio (portafolio)
    Portfolio(portfolio::PortfolioArgs),

    /// List a quote panel (Cotizaciones)
    Quotes(quotes::QuotesArgs),
}

pub async fn handle(cmd: Command, global: &GlobalArgs) -> Result<()> {
    match cmd {
        Command::Login(args) => login::run(args, global).await,
        Command::RefreshToken(args) => refresh_token::run(args, global).await,
        Command::Status(args) => status::run(args, global).await,
        Command::Logout(args) => logout::run(args, global).await,
        Command::Get(args) => get::run(args, global).await,
        Command::Post(args) => post::run(args, global).await,
        Command::Account(args) => account::run(args, global).await,
        Command::Portfolio(args) => portfolio::run(args, global).await,
        Command::Quotes(args) => quotes::run(args, global).await,
    }
}
