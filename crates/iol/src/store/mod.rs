//! Token persistence.
//!
//! A [`TokenStore`] holds at most one [`TokenRecord`]. Loading never fails:
//! a missing or unreadable record is reported as `None` so that the session
//! simply authenticates again.

mod file;
mod memory;

pub use file::{DEFAULT_TOKEN_FILE, FileTokenStore};
pub use memory::MemoryTokenStore;

use crate::auth::TokenRecord;
use crate::error::StoreError;

/// Persistence boundary for the current token record.
pub trait TokenStore: Send + Sync {
    /// Load the stored record, or `None` if absent or unusable.
    fn load(&self) -> Option<TokenRecord>;

    /// Replace the stored record with `record`.
    fn save(&mut self, record: &TokenRecord) -> Result<(), StoreError>;

    /// Remove the stored record, if any.
    fn clear(&mut self) -> Result<(), StoreError>;
}

impl<S: TokenStore + ?Sized> TokenStore for Box<S> {
    fn load(&self) -> Option<TokenRecord> {
        (**self).load()
    }

    fn save(&mut self, record: &TokenRecord) -> Result<(), StoreError> {
        (**self).save(record)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        (**self).clear()
    }
}
