//! Bearer token held in persistent storage.
//!
//! The token is read before every request and cleared on auth failure.
//! Last writer wins; there is no locking.

use std::rc::Rc;
use inbox_types::{InboxError, Result};
use crate::ports::StoragePort;

#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn StoragePort>,
    key: String,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn StoragePort>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub async fn token(&self) -> Result<Option<String>> {
        let token = self.storage.get(&self.key).await?;
        Ok(token.filter(|t| !t.trim().is_empty()))
    }

    /// The token, or `AuthExpired` when there is none.
    pub async fn require_token(&self) -> Result<String> {
        self.token().await?.ok_or(InboxError::AuthExpired)
    }

    /// Written by the login flow
    pub async fn store(&self, token: &str) -> Result<()> {
        self.storage.set(&self.key, token).await
    }

    pub async fn clear(&self) {
        if let Err(e) = self.storage.delete(&self.key).await {
            log::warn!(
                "Failed to clear session token from {}: {}",
                self.storage.backend_name(),
                e
            );
        }
    }
}
