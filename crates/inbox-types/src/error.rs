use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InboxError {
    /// Missing token, or the backend answered 401/403
    #[error("Session expired, please log in again")]
    AuthExpired,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Inbox engine has been shut down")]
    Shutdown,

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl InboxError {
    /// Map a non-success HTTP status to an error.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        match status {
            401 | 403 => InboxError::AuthExpired,
            _ => InboxError::Http {
                status,
                message: body.into(),
            },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, InboxError::AuthExpired)
    }

    /// Failures worth retrying on the next poll tick
    pub fn is_transient(&self) -> bool {
        match self {
            InboxError::Network(_) => true,
            InboxError::Http { status, .. } => *status >= 500 || *status == 408 || *status == 429,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for InboxError {
    fn from(e: serde_json::Error) -> Self {
        InboxError::Serialization(e.to_string())
    }
}
