//! Error types for the iol library.
//!
//! This module provides a unified error type with explicit variants for
//! configuration, authentication, transport, protocol and persistence errors.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Maximum length of a response body carried into an error message.
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// The unified error type for iol operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration. Fatal at construction time.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Authentication errors (bad credentials, exhausted refresh fallback).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Network transport errors (connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-success responses from a downstream endpoint.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Token file could not be written or removed.
    #[error("token store error: {0}")]
    Store(#[from] StoreError),
}

impl Error {
    /// Returns true if this error is an authentication failure.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth(_))
    }
}

/// Configuration resolution errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required variable {var}")]
    Missing { var: &'static str },

    /// A variable is set but cannot be used.
    #[error("invalid value for {var} ('{value}'): {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint rejected the username/password grant.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A refresh was requested but no refresh token is held.
    #[error("no refresh token available")]
    MissingRefreshToken,

    /// Refresh failed and the single fallback authentication failed as well.
    #[error("token refresh and re-authentication both failed: {source}")]
    Exhausted {
        #[source]
        source: Box<Error>,
    },
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error (body decoding, redirect loops, ...).
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// A non-success HTTP response from the API.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server, if any.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Build a protocol error from a raw response body.
    ///
    /// IOL error bodies carry `message` (API endpoints) or `error_description`
    /// (token endpoint); anything else is kept as truncated text.
    pub fn from_body(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["message", "Message", "error_description", "error"]
                    .iter()
                    .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(str::to_string))
            });

        let message = match parsed {
            Some(m) => Some(m),
            None if body.trim().is_empty() => None,
            None => Some(truncate_body(body)),
        };

        Self::new(status, message)
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
}

/// Token file persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure reading, writing or removing the token file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The token record could not be encoded.
    #[error("failed to encode token record: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_auth_variants_are_auth_errors() {
        assert!(Error::from(AuthError::InvalidCredentials).is_auth());
        let exhausted = AuthError::Exhausted {
            source: Box::new(TransportError::Timeout.into()),
        };
        assert!(Error::from(exhausted).is_auth());

        assert!(!Error::from(TransportError::Timeout).is_auth());
        assert!(!Error::from(ProtocolError::new(401, None)).is_auth());
        assert!(!Error::from(ConfigError::Missing { var: "IOL_USERNAME" }).is_auth());
    }

    #[test]
    fn protocol_error_prefers_message_field() {
        let err = ProtocolError::from_body(400, r#"{"message":"Parametros invalidos"}"#);
        assert_eq!(err.message.as_deref(), Some("Parametros invalidos"));
        assert_eq!(err.to_string(), "HTTP 400: Parametros invalidos");
    }

    #[test]
    fn protocol_error_reads_oauth_error_description() {
        let err = ProtocolError::from_body(
            400,
            r#"{"error":"invalid_grant","error_description":"usuario o clave incorrecta"}"#,
        );
        assert_eq!(err.message.as_deref(), Some("usuario o clave incorrecta"));
    }

    #[test]
    fn protocol_error_truncates_plain_bodies() {
        let body = "x".repeat(2000);
        let err = ProtocolError::from_body(502, &body);
        let message = err.message.unwrap();
        assert!(message.len() < 600);
        assert!(message.contains("2000 total bytes"));
    }

    #[test]
    fn protocol_error_empty_body_has_no_message() {
        let err = ProtocolError::from_body(401, "");
        assert!(err.message.is_none());
        assert!(err.is_auth_error());
        assert_eq!(err.to_string(), "HTTP 401");
    }
}
