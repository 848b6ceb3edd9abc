//! Engine state: the conversation list, the selection, and the lifecycle status.

use inbox_types::conversation::{AssistantProfile, Conversation};
use inbox_types::message::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineStatus {
    Uninitialized,
    Loading,
    /// No assistant assigned; the chat is replaced by a "check again" panel
    NoAssistant,
    Ready,
    /// Token missing or rejected; caller must re-authenticate
    AuthRequired,
    /// Initial fetch failed
    Error(String),
    Shutdown,
}

impl EngineStatus {
    pub fn label(&self) -> &str {
        match self {
            EngineStatus::Uninitialized => "Not started",
            EngineStatus::Loading => "Loading...",
            EngineStatus::NoAssistant => "No assistant assigned",
            EngineStatus::Ready => "Ready",
            EngineStatus::AuthRequired => "Please log in again",
            EngineStatus::Error(_) => "Error",
            EngineStatus::Shutdown => "Closed",
        }
    }
}

/// State visible to the UI.
///
/// `selected_id` always names an entry of `conversations`; the selected
/// conversation is that entry, so the two can never drift apart.
#[derive(Debug, Clone)]
pub struct InboxState {
    pub status: EngineStatus,
    pub assistant: Option<AssistantProfile>,
    pub conversations: Vec<Conversation>,
    pub selected_id: Option<String>,
    /// Sends whose request has not resolved yet
    pub pending_sends: usize,
    pub poll_active: bool,
}

impl InboxState {
    pub fn new() -> Self {
        Self {
            status: EngineStatus::Uninitialized,
            assistant: None,
            conversations: Vec::new(),
            selected_id: None,
            pending_sends: 0,
            poll_active: false,
        }
    }

    pub fn selected(&self) -> Option<&Conversation> {
        let id = self.selected_id.as_deref()?;
        self.conversation(id)
    }

    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn conversation_mut(&mut self, id: &str) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    pub fn pending_send(&self) -> bool {
        self.pending_sends > 0
    }

    pub fn has_assistant(&self) -> bool {
        self.assistant.is_some()
    }

    /// Conversation currently holding the message with this id
    pub fn find_message(&self, message_id: &str) -> Option<(&Conversation, &Message)> {
        self.conversations.iter().find_map(|c| {
            c.messages
                .iter()
                .find(|m| m.id == message_id)
                .map(|m| (c, m))
        })
    }

    /// Drop everything tied to the current session.
    pub fn clear_session_data(&mut self) {
        self.assistant = None;
        self.conversations.clear();
        self.selected_id = None;
        self.pending_sends = 0;
        self.poll_active = false;
    }
}

impl Default for InboxState {
    fn default() -> Self {
        Self::new()
    }
}
