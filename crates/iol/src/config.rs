//! Client configuration.
//!
//! Configuration is read from the process environment, after loading a `.env`
//! file if one is present. Variables:
//!
//! | variable           | required | default                          |
//! |--------------------|----------|----------------------------------|
//! | `IOL_USERNAME`     | yes      |                                  |
//! | `IOL_PASSWORD`     | yes      |                                  |
//! | `IOL_API_URL`      | no       | `https://api.invertironline.com` |
//! | `IOL_TOKEN_FILE`   | no       | `tokens.json`                    |
//! | `IOL_TIMEOUT_SECS` | no       | `30`                             |

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::auth::Credentials;
use crate::error::{ConfigError, Error};
use crate::http::DEFAULT_TIMEOUT;
use crate::store::DEFAULT_TOKEN_FILE;
use crate::types::ApiUrl;

pub const ENV_USERNAME: &str = "IOL_USERNAME";
pub const ENV_PASSWORD: &str = "IOL_PASSWORD";
pub const ENV_API_URL: &str = "IOL_API_URL";
pub const ENV_TOKEN_FILE: &str = "IOL_TOKEN_FILE";
pub const ENV_TIMEOUT_SECS: &str = "IOL_TIMEOUT_SECS";

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub token_file: PathBuf,
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from `.env` (if present) and the environment.
    pub fn from_env() -> Result<Self, Error> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(error = %e, "Ignoring unreadable .env file"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from a specific env file and the environment.
    ///
    /// Variables already set in the environment take precedence over the
    /// file, as with [`from_env`](Self::from_env).
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        dotenvy::from_path(path).map_err(|e| ConfigError::Invalid {
            var: "env file",
            value: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let username = get(ENV_USERNAME).ok_or(ConfigError::Missing { var: ENV_USERNAME })?;
        let password = get(ENV_PASSWORD).ok_or(ConfigError::Missing { var: ENV_PASSWORD })?;

        let api_url = match get(ENV_API_URL) {
            Some(value) => ApiUrl::new(value.trim()).map_err(|e| ConfigError::Invalid {
                var: ENV_API_URL,
                value: e.value,
                reason: e.reason,
            })?,
            None => ApiUrl::default(),
        };

        let token_file = get(ENV_TOKEN_FILE)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE));

        let timeout = match get(ENV_TIMEOUT_SECS) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| ConfigError::Invalid {
                    var: ENV_TIMEOUT_SECS,
                    value,
                    reason: "expected a positive number of seconds".to_string(),
                })?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            credentials: Credentials::new(username, password, api_url),
            token_file,
            timeout,
        })
    }
}
