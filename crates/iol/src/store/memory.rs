//! In-memory token store.

use crate::auth::TokenRecord;
use crate::error::StoreError;

use super::TokenStore;

/// Token store that keeps the record for the lifetime of the process only.
#[derive(Debug, Default, Clone)]
pub struct MemoryTokenStore {
    record: Option<TokenRecord>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `record`.
    pub fn with_record(record: TokenRecord) -> Self {
        Self {
            record: Some(record),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<TokenRecord> {
        self.record.clone()
    }

    fn save(&mut self, record: &TokenRecord) -> Result<(), StoreError> {
        self.record = Some(record.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.record = None;
        Ok(())
    }
}
