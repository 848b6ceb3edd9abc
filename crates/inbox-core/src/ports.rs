//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `inbox-core` (pure Rust).
//! Implementations live in `inbox-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use inbox_types::{
    Result,
    api::{SendMessageRequest, UserData},
    conversation::Conversation,
};

// ─── REST API Port ───────────────────────────────────────────

/// The customer endpoints the inbox talks to.
/// Every call takes the bearer token read just before the request.
#[async_trait(?Send)]
pub trait InboxApiPort {
    /// `GET /customer/userdata`: assistant plus all conversations
    async fn fetch_user_data(&self, token: &str) -> Result<UserData>;

    /// `GET /customer/messages`: authoritative conversation list
    async fn fetch_messages(&self, token: &str) -> Result<Vec<Conversation>>;

    /// `POST /customer/createConv`
    async fn create_conversation(&self, token: &str, assistant_id: &str) -> Result<Conversation>;

    /// `POST /customer/sendMessage`: response body is ignored
    async fn send_message(&self, token: &str, req: &SendMessageRequest) -> Result<()>;
}

// ─── Storage Port ────────────────────────────────────────────

/// Persistent string key-value store (localStorage in the browser).
#[async_trait(?Send)]
pub trait StoragePort {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Scheduler Port ──────────────────────────────────────────

/// Single-threaded task spawning and timers.
#[async_trait(?Send)]
pub trait SchedulerPort {
    /// Run a task on the local executor
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);

    /// Resolve after `ms` milliseconds
    async fn sleep(&self, ms: u64);
}
