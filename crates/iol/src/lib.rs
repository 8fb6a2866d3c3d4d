//! iol - InvertirOnline REST API client.
//!
//! This library wraps the InvertirOnline broker API behind an explicit
//! [`IolClient`]. The client authenticates with username and password,
//! keeps the bearer/refresh token pair in a [`TokenStore`] (a JSON file by
//! default) and refreshes an expired token lazily before each request.
//!
//! # Example
//!
//! ```no_run
//! use iol::{Config, IolClient};
//!
//! # async fn example() -> Result<(), iol::Error> {
//! let config = Config::from_env()?;
//!
//! let quotes = IolClient::scope(config, async |client| {
//!     client.quotes("ACCIONES", "ARGENTINA", "Todos").await
//! })
//! .await?;
//!
//! for quote in quotes.quotes {
//!     println!("{:?}: {:?}", quote.symbol, quote.last_price);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! A client is driven by one task at a time: every request takes `&mut self`
//! because it may replace the token. Nothing is locked internally.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, Session, SessionState, TokenRecord};
pub use client::IolClient;
pub use config::Config;
pub use error::Error;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
