//! `window.localStorage` backend.
//! Persistent across page reloads; shared with the login page, which
//! writes the bearer token here.

use async_trait::async_trait;
use wasm_bindgen::JsValue;

use inbox_core::ports::StoragePort;
use inbox_types::{InboxError, Result};

pub struct LocalStorage {
    storage: web_sys::Storage,
}

fn storage_err(e: JsValue) -> InboxError {
    InboxError::Storage(format!("{:?}", e))
}

impl LocalStorage {
    /// Fails when the page has no window or storage access is blocked
    /// (private mode, sandboxed iframes).
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| InboxError::JsInterop("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(storage_err)?
            .ok_or_else(|| InboxError::Storage("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }
}

#[async_trait(?Send)]
impl StoragePort for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(storage_err)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(storage_err)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(storage_err)
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}
