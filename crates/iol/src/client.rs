//! High-level API client.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::api::QuotePanel;
use crate::auth::{Credentials, Session, SessionState, TokenRecord};
use crate::config::Config;
use crate::error::Error;
use crate::http::{ACCOUNT_STATE, HttpClient, PORTFOLIO, quotes_path};
use crate::store::{FileTokenStore, TokenStore};

/// Client for the InvertirOnline REST API.
///
/// Every request first asks the [`Session`] for a valid bearer token, so a
/// missing or expired token is replaced transparently right before the call.
///
/// The client owns its HTTP connection pool and token store. Dropping it
/// writes the current token to the store; [`close`](Self::close) does the same
/// but reports a write failure instead of logging it. [`scope`](Self::scope)
/// pairs construction and teardown around a block of work.
///
/// # Example
///
/// ```no_run
/// use iol::{Config, IolClient};
///
/// # async fn example() -> Result<(), iol::Error> {
/// let config = Config::from_env()?;
/// let mut client = IolClient::new(config)?;
///
/// let account = client.get("/api/v2/estadocuenta").await?;
/// println!("{}", account);
/// # Ok(())
/// # }
/// ```
pub struct IolClient {
    http: HttpClient,
    session: Session,
    closed: bool,
}

impl IolClient {
    /// Create a client persisting tokens to the configured token file.
    pub fn new(config: Config) -> Result<Self, Error> {
        let store = FileTokenStore::new(config.token_file);
        Self::with_store(config.credentials, store, config.timeout)
    }

    /// Create a client with an explicit token store.
    pub fn with_store<S>(credentials: Credentials, store: S, timeout: Duration) -> Result<Self, Error>
    where
        S: TokenStore + 'static,
    {
        let http = HttpClient::new(credentials.api_url().clone(), timeout)?;
        let session = Session::new(credentials, http.clone(), Box::new(store));
        debug!(api = %http.api(), state = ?session.state(), "Client opened");

        Ok(Self {
            http,
            session,
            closed: false,
        })
    }

    /// Run `f` against a freshly opened client, then close it.
    ///
    /// The client is torn down whether `f` succeeds or fails. If `f` fails,
    /// its error is returned and a teardown failure is only logged.
    pub async fn scope<T, E>(
        config: Config,
        f: impl AsyncFnOnce(&mut IolClient) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<Error>,
    {
        let mut client = Self::new(config)?;
        let result = f(&mut client).await;

        match (result, client.close()) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e.into()),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_err)) => {
                warn!(error = %close_err, "Failed to close client");
                Err(e)
            }
        }
    }

    /// Returns the underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current token lifecycle state.
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Authenticate with the username/password grant, replacing any token.
    pub async fn authenticate(&mut self) -> Result<&TokenRecord, Error> {
        self.session.authenticate().await
    }

    /// Refresh the token, falling back to a single re-authentication.
    pub async fn refresh(&mut self) -> Result<&TokenRecord, Error> {
        self.session.refresh().await
    }

    /// Authenticated GET returning the parsed JSON body.
    pub async fn get(&mut self, path: &str) -> Result<Value, Error> {
        self.get_as(path, &[] as &[(&str, &str)]).await
    }

    /// Authenticated GET with query parameters.
    pub async fn get_with_query<Q>(&mut self, path: &str, query: &Q) -> Result<Value, Error>
    where
        Q: Serialize + std::fmt::Debug + ?Sized,
    {
        self.get_as(path, query).await
    }

    /// Authenticated GET decoding the body into `R`.
    #[instrument(skip(self, query))]
    pub async fn get_as<Q, R>(&mut self, path: &str, query: &Q) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug + ?Sized,
        R: DeserializeOwned,
    {
        let token = self.session.ensure_valid_token().await?;
        self.http.get_authed(path, query, &token).await
    }

    /// Authenticated POST with a form-encoded body.
    #[instrument(skip(self, form))]
    pub async fn post<F>(&mut self, path: &str, form: &F) -> Result<Value, Error>
    where
        F: Serialize + ?Sized,
    {
        let token = self.session.ensure_valid_token().await?;
        self.http.post_form_authed(path, form, &token).await
    }

    /// Authenticated POST with a JSON body.
    #[instrument(skip(self, body))]
    pub async fn post_json<B>(&mut self, path: &str, body: &B) -> Result<Value, Error>
    where
        B: Serialize + ?Sized,
    {
        let token = self.session.ensure_valid_token().await?;
        self.http.post_json_authed(path, body, &token).await
    }

    /// Account balances (`estadocuenta`).
    pub async fn account_state(&mut self) -> Result<Value, Error> {
        self.get(ACCOUNT_STATE).await
    }

    /// Portfolio holdings (`portafolio`).
    pub async fn portfolio(&mut self) -> Result<Value, Error> {
        self.get(PORTFOLIO).await
    }

    /// Quote panel for an instrument type in a country, e.g.
    /// `("ACCIONES", "ARGENTINA", "Todos")`.
    pub async fn quotes(
        &mut self,
        instrument: &str,
        country: &str,
        panel: &str,
    ) -> Result<QuotePanel, Error> {
        let path = quotes_path(instrument, country, panel);
        self.get_as(&path, &[] as &[(&str, &str)]).await
    }

    /// Forget the current token, in memory and on disk.
    pub fn logout(&mut self) -> Result<(), Error> {
        self.session.invalidate()
    }

    /// Close the client, persisting the current token.
    pub fn close(mut self) -> Result<(), Error> {
        self.closed = true;
        self.session.persist()?;
        debug!("Client closed");
        Ok(())
    }
}

impl Drop for IolClient {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.session.persist() {
            warn!(error = %e, "Failed to persist token on drop");
        }
        debug!("Client dropped");
    }
}

impl std::fmt::Debug for IolClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IolClient")
            .field("api", self.http.api())
            .field("session", &self.session)
            .finish()
    }
}
