//! Typed models for the endpoints the client wraps directly.
//!
//! Everything else is reachable through [`IolClient::get`](crate::IolClient::get)
//! and friends as raw JSON.

mod quotes;

pub use quotes::{BestQuotes, Quote, QuotePanel};
