//! Browser adapters for the inbox engine ports.
//!
//! - `api`: the customer REST endpoints over `fetch()`
//! - `storage`: localStorage with an in-memory fallback
//! - `scheduler`: `spawn_local` plus `setTimeout`

pub mod api;
pub mod scheduler;
pub mod storage;

pub use api::RestInboxApi;
pub use scheduler::BrowserScheduler;
pub use storage::{auto_detect_storage, open_storage, LocalStorage, MemoryStorage};
