//! Pick the storage backend.
//!
//! Priority: localStorage → Memory (fallback)

use std::rc::Rc;
use inbox_core::ports::StoragePort;
use inbox_types::config::StorageBackendType;
use super::{LocalStorage, MemoryStorage};

/// Open the configured backend. `Auto` prefers localStorage and falls back
/// to memory, so the caller always gets a working store.
pub fn open_storage(backend: StorageBackendType) -> Rc<dyn StoragePort> {
    match backend {
        StorageBackendType::Memory => {
            log::info!("Storage backend: memory");
            Rc::new(MemoryStorage::new())
        }
        StorageBackendType::LocalStorage | StorageBackendType::Auto => match LocalStorage::open() {
            Ok(local) => {
                log::info!("Storage backend: localStorage");
                Rc::new(local)
            }
            Err(e) => {
                log::warn!("localStorage unavailable ({}), falling back to memory", e);
                Rc::new(MemoryStorage::new())
            }
        },
    }
}

/// Shorthand for `open_storage(StorageBackendType::Auto)`.
pub fn auto_detect_storage() -> Rc<dyn StoragePort> {
    open_storage(StorageBackendType::Auto)
}
