//! Endpoint paths and request bodies.

use serde::Serialize;

/// OAuth token endpoint, shared by the password and refresh-token grants.
pub const TOKEN: &str = "token";

/// Account balances and positions summary.
pub const ACCOUNT_STATE: &str = "/api/v2/estadocuenta";

/// Portfolio holdings.
pub const PORTFOLIO: &str = "/api/v2/portafolio";

/// Quote panel listing for an instrument type in a country.
pub fn quotes_path(instrument: &str, country: &str, panel: &str) -> String {
    format!("/api/v2/Cotizaciones/{}/{}/{}", instrument, country, panel)
}

/// Form body for the password grant.
#[derive(Serialize)]
pub struct PasswordGrant<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub grant_type: &'static str,
}

impl<'a> PasswordGrant<'a> {
    pub fn new(username: &'a str, password: &'a str) -> Self {
        Self {
            username,
            password,
            grant_type: "password",
        }
    }
}

// Intentionally hide password in Debug output
impl std::fmt::Debug for PasswordGrant<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordGrant")
            .field("username", &self.username)
            .field("grant_type", &self.grant_type)
            .finish_non_exhaustive()
    }
}

/// Form body for the refresh-token grant.
#[derive(Serialize)]
pub struct RefreshGrant<'a> {
    pub refresh_token: &'a str,
    pub grant_type: &'static str,
}

impl<'a> RefreshGrant<'a> {
    pub fn new(refresh_token: &'a str) -> Self {
        Self {
            refresh_token,
            grant_type: "refresh_token",
        }
    }
}

impl std::fmt::Debug for RefreshGrant<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshGrant")
            .field("grant_type", &self.grant_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_path_layout() {
        assert_eq!(
            quotes_path("ACCIONES", "ARGENTINA", "Todos"),
            "/api/v2/Cotizaciones/ACCIONES/ARGENTINA/Todos"
        );
    }

    #[test]
    fn grants_hide_secrets_in_debug() {
        let password = format!("{:?}", PasswordGrant::new("inversor", "hunter2"));
        assert!(password.contains("inversor"));
        assert!(!password.contains("hunter2"));

        let refresh = format!("{:?}", RefreshGrant::new("rt-secret"));
        assert!(!refresh.contains("rt-secret"));
    }
}
