//! Inbox core: sync engine and port traits.
//!
//! Pure Rust: everything platform-specific (HTTP, storage, timers) comes in
//! through the traits in [`ports`].

pub mod engine;
pub mod event_bus;
pub mod ports;
pub mod reconcile;
pub mod session;
pub mod state;

mod poller;
