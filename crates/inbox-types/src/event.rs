use serde::{Deserialize, Serialize};

/// Events emitted by the inbox engine.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboxEvent {
    /// Initialization finished; `assistant` is None when nobody is assigned
    Initialized { assistant: Option<String>, conversations: usize },
    /// A poll replaced the conversation list
    ConversationsRefreshed { conversations: usize },
    /// Selection changed; the chat view scrolls to the latest message
    ConversationSelected { id: String },
    /// Optimistic message appended locally
    MessageQueued { conversation_id: String, temp_id: String },
    /// Placeholder conversation received its server id
    ConversationPromoted { temp_id: String, id: String },
    /// Server accepted a message
    MessageSent { conversation_id: String, temp_id: String },
    /// Optimistic message removed after a failed send
    MessageReverted { conversation_id: String, temp_id: String },
    PollingStarted,
    PollingStopped,
    /// User-visible toast
    Notice { kind: NoticeKind, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    AuthExpired,
    SendFailed,
    FetchFailed,
    Validation,
}

impl NoticeKind {
    pub fn label(&self) -> &str {
        match self {
            NoticeKind::AuthExpired => "Session expired",
            NoticeKind::SendFailed => "Message not sent",
            NoticeKind::FetchFailed => "Could not load messages",
            NoticeKind::Validation => "Cannot send",
        }
    }
}
