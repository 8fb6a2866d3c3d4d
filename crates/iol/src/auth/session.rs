//! Token lifecycle for authenticated API requests.

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::error::{AuthError, Error};
use crate::http::{HttpClient, PasswordGrant, RefreshGrant};
use crate::store::TokenStore;

use super::credentials::Credentials;
use super::tokens::TokenRecord;

/// Where a session stands with respect to its access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No token has been obtained or loaded.
    Unauthenticated,
    /// The access token is still valid.
    Authenticated,
    /// A token exists but its access token has expired.
    Expired,
}

/// Owner of the current [`TokenRecord`].
///
/// A session hands out a valid bearer token on demand. Expiry is checked
/// lazily, right before a request: an expired token is refreshed with the
/// refresh-token grant, and if that fails the session authenticates again
/// with the full credentials, once. Every token obtained is written to the
/// session's [`TokenStore`].
///
/// # Concurrency
///
/// Token-changing operations take `&mut self`. A session is meant to be
/// driven by one task at a time and performs no locking of its own.
pub struct Session {
    credentials: Credentials,
    http: HttpClient,
    store: Box<dyn TokenStore>,
    record: Option<TokenRecord>,
}

impl Session {
    /// Create a session, restoring any record found in `store`.
    ///
    /// An expired record is kept: its refresh token is still worth trying.
    pub fn new(credentials: Credentials, http: HttpClient, store: Box<dyn TokenStore>) -> Self {
        let record = store.load();
        match &record {
            Some(r) if r.is_expired() => debug!(expires_at = %r.expires_at, "Restored expired token"),
            Some(r) => debug!(expires_at = %r.expires_at, "Restored token"),
            None => debug!("No stored token"),
        }

        Self {
            credentials,
            http,
            store,
            record,
        }
    }

    /// Returns the credentials this session authenticates with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the current token record, if any, without checking expiry.
    pub fn token(&self) -> Option<&TokenRecord> {
        self.record.as_ref()
    }

    /// Returns the token store backing this session.
    pub fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        match &self.record {
            None => SessionState::Unauthenticated,
            Some(r) if r.is_expired() => SessionState::Expired,
            Some(_) => SessionState::Authenticated,
        }
    }

    /// Obtain a new token with the username/password grant.
    ///
    /// On failure the current record, if any, is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if the token endpoint rejects
    /// the credentials, or a transport error if it cannot be reached.
    #[instrument(skip(self), fields(username = %self.credentials.username()))]
    pub async fn authenticate(&mut self) -> Result<&TokenRecord, Error> {
        info!("Authenticating");

        let grant = PasswordGrant::new(self.credentials.username(), self.credentials.password());
        let issued_at = Utc::now();
        let response = self.http.token_grant(&grant).await.map_err(|e| match e {
            Error::Protocol(p) if matches!(p.status, 400 | 401) => {
                debug!(error = %p, "Password grant rejected");
                Error::Auth(AuthError::InvalidCredentials)
            }
            other => other,
        })?;

        let record = TokenRecord::from_response(response, issued_at)?;
        debug!(expires_at = %record.expires_at, "Authenticated");
        Ok(self.install(record))
    }

    /// Replace the token using the refresh-token grant.
    ///
    /// If there is no refresh token, or the grant fails for any reason, the
    /// session falls back to a single [`authenticate`](Self::authenticate).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Exhausted`] when the fallback fails too.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<&TokenRecord, Error> {
        info!("Refreshing token");

        match self.try_refresh().await {
            Ok(record) => {
                debug!(expires_at = %record.expires_at, "Token refreshed");
                return Ok(self.install(record));
            }
            Err(e) => warn!(error = %e, "Token refresh failed, re-authenticating"),
        }

        match self.authenticate().await {
            Ok(record) => Ok(record),
            Err(e) => Err(AuthError::Exhausted {
                source: Box::new(e),
            }
            .into()),
        }
    }

    /// Return a valid access token, obtaining a new one first if needed.
    ///
    /// A token that has not expired is returned unchanged. With no token the
    /// session authenticates; with an expired one it refreshes.
    pub async fn ensure_valid_token(&mut self) -> Result<String, Error> {
        if let Some(record) = self.record.as_ref().filter(|r| !r.is_expired()) {
            return Ok(record.access_token.clone());
        }

        let record = if self.record.is_some() {
            self.refresh().await?
        } else {
            self.authenticate().await?
        };
        Ok(record.access_token.clone())
    }

    /// Write the current record to the store.
    pub fn persist(&mut self) -> Result<(), Error> {
        if let Some(record) = &self.record {
            self.store.save(record)?;
        }
        Ok(())
    }

    /// Forget the current token, in memory and in the store.
    pub fn invalidate(&mut self) -> Result<(), Error> {
        self.record = None;
        self.store.clear()?;
        info!("Session invalidated");
        Ok(())
    }

    async fn try_refresh(&self) -> Result<TokenRecord, Error> {
        let refresh_token = match &self.record {
            Some(r) if !r.refresh_token.is_empty() => r.refresh_token.as_str(),
            _ => return Err(AuthError::MissingRefreshToken.into()),
        };

        let issued_at = Utc::now();
        let response = self
            .http
            .token_grant(&RefreshGrant::new(refresh_token))
            .await?;
        TokenRecord::from_response(response, issued_at)
    }

    /// Install a freshly issued record and persist it.
    ///
    /// A store failure does not invalidate the token; it is logged and the
    /// session keeps working in memory.
    fn install(&mut self, record: TokenRecord) -> &TokenRecord {
        if let Err(e) = self.store.save(&record) {
            warn!(error = %e, "Failed to persist token, continuing in memory");
        }
        self.record.insert(record)
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.credentials)
            .field("state", &self.state())
            .field("token", &self.record)
            .finish_non_exhaustive()
    }
}
