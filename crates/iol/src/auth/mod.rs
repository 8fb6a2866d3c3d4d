//! Authentication types and session management.
//!
//! All authenticated requests obtain their bearer token from a [`Session`],
//! which owns the current [`TokenRecord`] and keeps it in sync with a
//! [`TokenStore`](crate::store::TokenStore).

mod credentials;
mod session;
mod tokens;

pub use credentials::Credentials;
pub use session::{Session, SessionState};
pub use tokens::TokenRecord;
pub(crate) use tokens::TokenResponse;
