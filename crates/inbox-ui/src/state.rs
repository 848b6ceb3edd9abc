//! UI-level state that drives rendering.
//! The conversation data itself is read straight from the engine; this
//! only keeps what the engine does not: toasts, the input field, and
//! scroll requests. Updated each frame by draining the EventBus.

use inbox_types::event::{InboxEvent, NoticeKind};

/// A toast shown on top of the inbox until `expires_at`
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// Seconds on the egui clock
    pub expires_at: f64,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        !matches!(self.kind, NoticeKind::Validation)
    }
}

/// State visible to UI panels
pub struct UiState {
    pub notices: Vec<Notice>,
    /// Input field content
    pub input_text: String,
    /// Set when the chat should jump to the newest message on the next frame
    pub scroll_to_bottom: bool,
    /// Status line text
    pub status_text: String,
    pub polling: bool,
    notice_ttl_secs: f64,
}

impl UiState {
    pub fn new(notice_ttl_secs: u64) -> Self {
        Self {
            notices: Vec::new(),
            input_text: String::new(),
            scroll_to_bottom: false,
            status_text: "Connecting...".to_string(),
            polling: false,
            notice_ttl_secs: notice_ttl_secs as f64,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<InboxEvent>, now: f64) {
        for event in events {
            match event {
                InboxEvent::Initialized { assistant, .. } => {
                    self.status_text = match assistant {
                        Some(name) => format!("Chatting with {}", name),
                        None => "No assistant assigned".to_string(),
                    };
                }
                InboxEvent::ConversationSelected { .. } => {
                    self.scroll_to_bottom = true;
                }
                InboxEvent::MessageQueued { .. } => {
                    self.scroll_to_bottom = true;
                    self.status_text = "Sending...".to_string();
                }
                InboxEvent::MessageSent { .. } | InboxEvent::MessageReverted { .. } => {
                    self.status_text = "Ready".to_string();
                }
                InboxEvent::ConversationPromoted { .. } | InboxEvent::ConversationsRefreshed { .. } => {}
                InboxEvent::PollingStarted => self.polling = true,
                InboxEvent::PollingStopped => self.polling = false,
                InboxEvent::Notice { kind, message } => self.push_notice(kind, message, now),
            }
        }
    }

    /// Same kind and text as a visible toast only extends that toast.
    pub fn push_notice(&mut self, kind: NoticeKind, message: String, now: f64) {
        let expires_at = now + self.notice_ttl_secs;
        if let Some(existing) = self
            .notices
            .iter_mut()
            .find(|n| n.kind == kind && n.message == message)
        {
            existing.expires_at = expires_at;
            return;
        }
        log::debug!("Notice: {}: {}", kind.label(), message);
        self.notices.push(Notice {
            kind,
            message,
            expires_at,
        });
    }

    /// Drop expired toasts. Returns true if any remain.
    pub fn prune_notices(&mut self, now: f64) -> bool {
        self.notices.retain(|n| n.expires_at > now);
        !self.notices.is_empty()
    }

    pub fn dismiss_notice(&mut self, index: usize) {
        if index < self.notices.len() {
            self.notices.remove(index);
        }
    }

    /// Take the trimmed input for sending; None when there is nothing to send.
    pub fn take_input(&mut self) -> Option<String> {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.input_text.clear();
        Some(text)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(inbox_types::config::DEFAULT_NOTICE_TTL_SECS)
    }
}
