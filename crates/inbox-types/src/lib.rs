pub mod api;
pub mod config;
pub mod conversation;
pub mod error;
pub mod event;
pub mod message;

#[cfg(test)]
mod tests;

pub use error::InboxError;
pub type Result<T> = std::result::Result<T, InboxError>;
