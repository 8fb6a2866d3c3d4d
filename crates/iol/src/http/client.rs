//! HTTP client implementation.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use crate::auth::TokenResponse;
use crate::error::{Error, ProtocolError, TransportError};
use crate::types::ApiUrl;

use super::endpoints::TOKEN;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the InvertirOnline API.
///
/// Clone is cheap: the underlying `reqwest::Client` shares its connection
/// pool between clones.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    api: ApiUrl,
}

impl HttpClient {
    /// Create a new client for the given API base URL.
    pub fn new(api: ApiUrl, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("iol/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(TransportError::from)?;

        Ok(Self { client, api })
    }

    /// Returns the API base URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Post an OAuth grant to the token endpoint.
    #[instrument(skip(self, form), fields(api = %self.api))]
    pub(crate) async fn token_grant<F>(&self, form: &F) -> Result<TokenResponse, Error>
    where
        F: Serialize + std::fmt::Debug,
    {
        let url = self.api.endpoint(TOKEN);
        debug!(?form, "Token request");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .form(form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make an authenticated GET request.
    #[instrument(skip(self, query, token), fields(api = %self.api))]
    pub async fn get_authed<Q, R>(&self, path: &str, query: &Q, token: &str) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(path, "Authenticated GET");
        trace!(?query, "query parameters");

        let response = self
            .client
            .get(&url)
            .query(query)
            .header(AUTHORIZATION, bearer(token)?)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make an authenticated POST request with a form-encoded body.
    #[instrument(skip(self, form, token), fields(api = %self.api))]
    pub async fn post_form_authed<F, R>(&self, path: &str, form: &F, token: &str) -> Result<R, Error>
    where
        F: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(path, "Authenticated POST (form)");

        let response = self
            .client
            .post(&url)
            .form(form)
            .header(AUTHORIZATION, bearer(token)?)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make an authenticated POST request with a JSON body.
    #[instrument(skip(self, body, token), fields(api = %self.api))]
    pub async fn post_json_authed<B, R>(&self, path: &str, body: &B, token: &str) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(path, "Authenticated POST (json)");

        let response = self
            .client
            .post(&url)
            .json(body)
            .header(AUTHORIZATION, bearer(token)?)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle a response, parsing the body or error.
    ///
    /// An empty success body decodes as JSON `null`.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "HTTP response");

        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProtocolError::from_body(status.as_u16(), &body).into());
        }

        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| {
            TransportError::Http {
                message: format!("failed to decode response body: {}", e),
            }
            .into()
        })
    }
}

fn bearer(token: &str) -> Result<HeaderValue, Error> {
    let mut value =
        HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| TransportError::Http {
            message: "access token contains invalid header characters".to_string(),
        })?;
    value.set_sensitive(true);
    Ok(value)
}
