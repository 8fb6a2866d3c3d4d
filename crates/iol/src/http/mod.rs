//! HTTP transport.
//!
//! This module wraps `reqwest` for the two kinds of traffic the client
//! produces: OAuth grants against `/token` and bearer-authorized API calls.

mod client;
mod endpoints;

pub use client::{DEFAULT_TIMEOUT, HttpClient};
pub(crate) use endpoints::*;
