//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Production base URL for the InvertirOnline API.
pub const DEFAULT_API_URL: &str = "https://api.invertironline.com";

/// Rejected API base URL.
#[derive(Debug, Error)]
#[error("invalid API URL '{value}': {reason}")]
pub struct InvalidApiUrl {
    pub value: String,
    pub reason: String,
}

/// A validated API base URL.
///
/// The URL must be absolute and use HTTPS, except that plain HTTP is accepted
/// for loopback hosts so that a local mock server can stand in for the API.
///
/// # Example
///
/// ```
/// use iol::ApiUrl;
///
/// let api = ApiUrl::new("https://api.invertironline.com/").unwrap();
/// assert_eq!(api.endpoint("/api/v2/estadocuenta"),
///            "https://api.invertironline.com/api/v2/estadocuenta");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    pub fn new(s: impl AsRef<str>) -> Result<Self, InvalidApiUrl> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| invalid(s, e.to_string()))?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL for an endpoint path.
    ///
    /// Leading slashes on `path` are ignored, so `"/token"` and `"token"`
    /// resolve to the same URL.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the URL of the OAuth token endpoint.
    pub fn token_url(&self) -> String {
        self.endpoint("token")
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), InvalidApiUrl> {
        if url.cannot_be_a_base() {
            return Err(invalid(original, "must be an absolute URL"));
        }

        if url.host_str().is_none() {
            return Err(invalid(original, "must have a host"));
        }

        let scheme = url.scheme();
        let is_loopback = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_loopback) {
            return Err(invalid(
                original,
                "must use HTTPS (HTTP allowed only for localhost)",
            ));
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid(original, "must not carry a query or fragment"));
        }

        Ok(())
    }
}

fn invalid(value: &str, reason: impl Into<String>) -> InvalidApiUrl {
    InvalidApiUrl {
        value: value.to_string(),
        reason: reason.into(),
    }
}

impl Default for ApiUrl {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_API_URL).expect("default API URL is valid"))
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_str().trim_end_matches('/'))
    }
}

impl FromStr for ApiUrl {
    type Err = InvalidApiUrl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}
