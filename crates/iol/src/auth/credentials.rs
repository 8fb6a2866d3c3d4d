//! Login credentials type.

use std::fmt;

use crate::types::ApiUrl;

/// Login credentials for the InvertirOnline token endpoint.
///
/// Holds the account username and password together with the API base URL
/// they authenticate against. Credentials are resolved once and never change
/// for the lifetime of a client.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use iol::{ApiUrl, Credentials};
///
/// let creds = Credentials::new("inversor", "clave", ApiUrl::default());
/// assert_eq!(creds.username(), "inversor");
/// ```
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
    api_url: ApiUrl,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>, api_url: ApiUrl) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            api_url,
        }
    }

    /// Returns the account username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the API base URL.
    pub fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the password.
    ///
    /// Use this only when constructing the password grant.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish()
    }
}
