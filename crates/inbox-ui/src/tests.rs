#[cfg(test)]
mod tests {
    use crate::panels::conversations::preview;
    use crate::state::*;
    use crate::theme::Palette;
    use inbox_types::config::ThemeConfig;
    use inbox_types::conversation::{AssistantProfile, Conversation};
    use inbox_types::event::{InboxEvent, NoticeKind};
    use inbox_types::message::Message;

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new(5);
        assert!(state.notices.is_empty());
        assert!(state.input_text.is_empty());
        assert!(!state.scroll_to_bottom);
        assert!(!state.polling);
        assert_eq!(state.status_text, "Connecting...");
    }

    #[test]
    fn test_ui_state_initialized_with_assistant() {
        let mut state = UiState::new(5);
        state.process_events(
            vec![InboxEvent::Initialized {
                assistant: Some("Dana".to_string()),
                conversations: 2,
            }],
            0.0,
        );
        assert_eq!(state.status_text, "Chatting with Dana");
    }

    #[test]
    fn test_ui_state_initialized_without_assistant() {
        let mut state = UiState::new(5);
        state.process_events(
            vec![InboxEvent::Initialized {
                assistant: None,
                conversations: 0,
            }],
            0.0,
        );
        assert_eq!(state.status_text, "No assistant assigned");
    }

    #[test]
    fn test_ui_state_selection_requests_scroll() {
        let mut state = UiState::new(5);
        state.process_events(vec![InboxEvent::ConversationSelected { id: "c1".to_string() }], 0.0);
        assert!(state.scroll_to_bottom);
    }

    #[test]
    fn test_ui_state_send_lifecycle() {
        let mut state = UiState::new(5);
        state.process_events(
            vec![InboxEvent::MessageQueued {
                conversation_id: "c1".to_string(),
                temp_id: "temp-1".to_string(),
            }],
            0.0,
        );
        assert_eq!(state.status_text, "Sending...");
        assert!(state.scroll_to_bottom);

        state.process_events(
            vec![InboxEvent::MessageSent {
                conversation_id: "c1".to_string(),
                temp_id: "temp-1".to_string(),
            }],
            0.0,
        );
        assert_eq!(state.status_text, "Ready");
    }

    #[test]
    fn test_ui_state_polling_flag() {
        let mut state = UiState::new(5);
        state.process_events(vec![InboxEvent::PollingStarted], 0.0);
        assert!(state.polling);
        state.process_events(vec![InboxEvent::PollingStopped], 0.0);
        assert!(!state.polling);
    }

    // ─── Notices ─────────────────────────────────────────────

    fn notice(kind: NoticeKind, message: &str) -> InboxEvent {
        InboxEvent::Notice {
            kind,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_notice_expires_after_ttl() {
        let mut state = UiState::new(5);
        state.process_events(vec![notice(NoticeKind::SendFailed, "offline")], 10.0);

        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].expires_at, 15.0);
        assert!(state.prune_notices(14.9));
        assert!(!state.prune_notices(15.0));
        assert!(state.notices.is_empty());
    }

    #[test]
    fn test_duplicate_notice_extends_existing() {
        let mut state = UiState::new(5);
        state.process_events(vec![notice(NoticeKind::Validation, "Message is empty")], 0.0);
        state.process_events(vec![notice(NoticeKind::Validation, "Message is empty")], 3.0);

        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].expires_at, 8.0);
    }

    #[test]
    fn test_distinct_notices_stack() {
        let mut state = UiState::new(5);
        state.process_events(
            vec![
                notice(NoticeKind::SendFailed, "offline"),
                notice(NoticeKind::AuthExpired, "Please log in again."),
            ],
            0.0,
        );
        assert_eq!(state.notices.len(), 2);
        assert!(state.notices.iter().all(|n| n.is_error()));

        state.dismiss_notice(0);
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].kind, NoticeKind::AuthExpired);

        // out of range is ignored
        state.dismiss_notice(7);
        assert_eq!(state.notices.len(), 1);
    }

    #[test]
    fn test_validation_notice_is_not_an_error() {
        let mut state = UiState::new(5);
        state.process_events(vec![notice(NoticeKind::Validation, "Message is empty")], 0.0);
        assert!(!state.notices[0].is_error());
    }

    // ─── Input ───────────────────────────────────────────────

    #[test]
    fn test_take_input_trims_and_clears() {
        let mut state = UiState::new(5);
        state.input_text = "  hello there \n".to_string();
        assert_eq!(state.take_input(), Some("hello there".to_string()));
        assert!(state.input_text.is_empty());
    }

    #[test]
    fn test_take_input_whitespace_only() {
        let mut state = UiState::new(5);
        state.input_text = "   ".to_string();
        assert_eq!(state.take_input(), None);
        // left as typed
        assert_eq!(state.input_text, "   ");
    }

    // ─── Conversation preview ────────────────────────────────

    fn conversation_with(content: Option<&str>) -> Conversation {
        let mut conv = Conversation::placeholder(&AssistantProfile::from_id("a1"));
        conv.placeholder = false;
        if let Some(content) = content {
            conv.messages.push(Message::pending_user(content));
        }
        conv
    }

    #[test]
    fn test_preview_short_message() {
        assert_eq!(preview(&conversation_with(Some("Any news?"))), "Any news?");
    }

    #[test]
    fn test_preview_truncates_long_message() {
        let long = "a".repeat(60);
        let text = preview(&conversation_with(Some(&long)));
        assert_eq!(text.chars().count(), 41);
        assert!(text.ends_with('…'));
    }

    #[test]
    fn test_preview_empty_conversations() {
        assert_eq!(preview(&conversation_with(None)), "No messages yet");
        let placeholder = Conversation::placeholder(&AssistantProfile::from_id("a1"));
        assert_eq!(preview(&placeholder), "Say hello to your assistant");
    }

    // ─── Theme ───────────────────────────────────────────────

    #[test]
    fn test_palette_from_theme_config() {
        let mut theme = ThemeConfig::default();
        theme.accent = [1, 2, 3];
        let palette = Palette::from(&theme);
        assert_eq!(palette.accent, egui::Color32::from_rgb(1, 2, 3));
        assert_eq!(Palette::default(), Palette::from(&ThemeConfig::default()));
    }
}
