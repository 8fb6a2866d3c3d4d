//! Token record and token endpoint response types.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, TransportError};

/// The current bearer/refresh token pair and the access token's expiry.
///
/// `expires_at` is always the issuance time plus the lifetime the server
/// declared in `expires_in`. A record is replaced as a whole on every
/// authentication or refresh.
///
/// # Security
///
/// Token values are never displayed in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Create a record from explicit values.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at,
        }
    }

    /// Build a record from a token endpoint response received at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if `expires_in` does not yield a
    /// representable expiry instant.
    pub(crate) fn from_response(
        response: TokenResponse,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, Error> {
        let expires_at = Duration::try_seconds(response.expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| TransportError::Http {
                message: format!("invalid expires_in: {}", response.expires_in),
            })?;

        Ok(Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at,
        })
    }

    /// Returns true once `now` has reached the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Returns true if the access token has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Time left before expiry, clamped at zero.
    pub fn time_until_expiry(&self) -> Duration {
        (self.expires_at - Utc::now()).max(Duration::zero())
    }
}

impl fmt::Debug for TokenRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRecord")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Body returned by `POST /token` for both grant types.
///
/// IOL also sends `.issued`, `.expires` and `.refreshexpires`; they are
/// ignored because `expires_in` is authoritative.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    #[serde(default)]
    #[allow(dead_code)]
    pub token_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issued() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn expiry_is_issue_time_plus_lifetime() {
        let response: TokenResponse = serde_json::from_str(
            r#"{
                "access_token": "abc",
                "token_type": "bearer",
                "expires_in": 899,
                "refresh_token": "def",
                ".issued": "Fri, 01 Mar 2024 12:00:00 GMT",
                ".expires": "Fri, 01 Mar 2024 12:14:59 GMT",
                ".refreshexpires": "Fri, 01 Mar 2024 12:29:59 GMT"
            }"#,
        )
        .unwrap();

        let record = TokenRecord::from_response(response, issued()).unwrap();
        assert_eq!(record.access_token, "abc");
        assert_eq!(record.refresh_token, "def");
        assert_eq!(record.expires_at, issued() + Duration::seconds(899));
    }

    #[test]
    fn unrepresentable_lifetime_is_rejected() {
        for expires_in in [i64::MAX, i64::MIN, 100_000_000_000_000] {
            let response = TokenResponse {
                access_token: "abc".into(),
                refresh_token: "def".into(),
                expires_in,
                token_type: None,
            };
            let err = TokenRecord::from_response(response, issued()).unwrap_err();
            assert!(
                matches!(err, Error::Transport(TransportError::Http { .. })),
                "expires_in {expires_in}: got {err:?}"
            );
        }
    }

    #[test]
    fn expired_exactly_at_deadline() {
        let record = TokenRecord::new("a", "r", issued());
        assert!(!record.is_expired_at(issued() - Duration::seconds(1)));
        assert!(record.is_expired_at(issued()));
        assert!(record.is_expired_at(issued() + Duration::hours(1)));
    }

    #[test]
    fn record_hides_tokens_in_debug() {
        let record = TokenRecord::new("eyJhbGciOi", "refresh-value", issued());
        let debug = format!("{:?}", record);
        assert!(!debug.contains("eyJ"));
        assert!(!debug.contains("refresh-value"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn time_until_expiry_never_negative() {
        let record = TokenRecord::new("a", "r", Utc::now() - Duration::hours(1));
        assert_eq!(record.time_until_expiry(), Duration::zero());
    }
}
