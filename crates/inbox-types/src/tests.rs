#[cfg(test)]
mod tests {
    use crate::api::*;
    use crate::config::*;
    use crate::conversation::*;
    use crate::error::*;
    use crate::event::*;
    use crate::message::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_pending_user() {
        let msg = Message::pending_user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
        assert_eq!(msg.delivery, Delivery::Pending);
        assert!(msg.has_temp_id());
        assert!(!msg.is_confirmed());
    }

    #[test]
    fn test_temp_ids_are_unique() {
        let a = Message::pending_user("x");
        let b = Message::pending_user("x");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_message_deserialize_server_shape() {
        let json = r#"{"_id":"m1","role":"assistant","content":"Hi there","timestamp":"2026-01-01T10:00:00Z"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "m1");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "Hi there");
        assert_eq!(msg.delivery, Delivery::Confirmed);
        assert!(!msg.has_temp_id());
    }

    #[test]
    fn test_message_accepts_id_and_created_at_aliases() {
        let json = r#"{"id":"m2","role":"user","content":"a","createdAt":"2026-02-01T00:00:00Z"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "m2");
        assert_eq!(msg.created_at.to_rfc3339(), "2026-02-01T00:00:00+00:00");
    }

    #[test]
    fn test_message_missing_timestamp_defaults() {
        let json = r#"{"_id":"m3","role":"user"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert!(msg.content.is_empty());
    }

    #[test]
    fn test_delivery_not_serialized() {
        let msg = Message::pending_user("hey");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("delivery"));
        assert!(!json.contains("Pending"));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), r#""assistant""#);
        assert_eq!(Role::User.as_str(), "user");
    }

    #[test]
    fn test_unknown_role_rejected() {
        let json = r#"{"_id":"m","role":"system","content":"x"}"#;
        assert!(serde_json::from_str::<Message>(json).is_err());
    }

    #[test]
    fn test_message_with_both_id_keys_prefers_underscore_id() {
        let json = r#"{"_id":"m4","id":"m4-alt","role":"user","content":"x"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "m4");
    }

    #[test]
    fn test_message_with_both_timestamps_prefers_timestamp() {
        let json = r#"{"_id":"m5","role":"user","content":"x",
            "timestamp":"2026-03-01T00:00:00Z","createdAt":"2026-01-01T00:00:00Z"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.created_at.to_rfc3339(), "2026-03-01T00:00:00+00:00");
    }

    #[test]
    fn test_message_null_fields_default() {
        let json = r#"{"_id":"m6","role":"assistant","content":null,"timestamp":null}"#;
        let before = chrono::Utc::now();
        let msg: Message = serde_json::from_str(json).unwrap();
        assert!(msg.content.is_empty());
        assert!(msg.created_at >= before);

        let json = r#"{"_id":"m7","role":"user","timestamp":null,"createdAt":"2026-02-01T00:00:00Z"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.created_at.to_rfc3339(), "2026-02-01T00:00:00+00:00");
    }

    #[test]
    fn test_message_without_any_id_rejected() {
        let json = r#"{"role":"user","content":"x"}"#;
        assert!(serde_json::from_str::<Message>(json).is_err());
        let json = r#"{"_id":null,"id":null,"role":"user","content":"x"}"#;
        assert!(serde_json::from_str::<Message>(json).is_err());
    }

    // ─── Conversation Tests ──────────────────────────────────

    #[test]
    fn test_conversation_deserialize_defaults() {
        let conv: Conversation = serde_json::from_str(r#"{"_id":"c1"}"#).unwrap();
        assert_eq!(conv.id, "c1");
        assert!(conv.assistant_id.is_none());
        assert!(conv.messages.is_empty());
        assert!(conv.display.is_none());
        assert!(!conv.placeholder);
    }

    #[test]
    fn test_conversation_messages_keep_order() {
        let json = r#"{"_id":"c1","assistantId":"a1","conversation":[
            {"_id":"m1","role":"user","content":"one"},
            {"_id":"m2","role":"assistant","content":"two"}
        ]}"#;
        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conv.assistant_id.as_deref(), Some("a1"));
        let ids: Vec<&str> = conv.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn test_conversation_null_fields_default() {
        let json = r#"{"_id":"c2","id":"c2","assistantId":null,"conversation":null,"updatedAt":null}"#;
        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conv.id, "c2");
        assert!(conv.assistant_id.is_none());
        assert!(conv.messages.is_empty());
        assert!(conv.last_activity.is_none());
    }

    #[test]
    fn test_conversation_list_with_mixed_documents() {
        let json = r#"{"messages":[
            {"_id":"c1","id":"c1","conversation":[
                {"_id":"m1","id":"m1","role":"user","content":"one",
                 "timestamp":"2026-01-01T00:00:00Z","createdAt":"2026-01-01T00:00:00Z"}
            ]},
            {"id":"c2","conversation":null}
        ]}"#;
        let resp: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.messages.len(), 2);
        assert_eq!(resp.messages[0].messages[0].id, "m1");
        assert_eq!(resp.messages[1].id, "c2");
        assert!(resp.messages[1].messages.is_empty());
    }

    #[test]
    fn test_placeholder_conversation() {
        let assistant = AssistantProfile::from_id("a1");
        let conv = Conversation::placeholder(&assistant);
        assert!(conv.placeholder);
        assert!(is_temp_id(&conv.id));
        assert_eq!(conv.assistant_id.as_deref(), Some("a1"));
        assert!(conv.messages.is_empty());
        assert_eq!(conv.display.as_ref().unwrap().name, DEFAULT_ASSISTANT_NAME);
    }

    #[test]
    fn test_decorate_copies_display() {
        let assistant = AssistantProfile {
            id: "a1".to_string(),
            name: "Dana Reyes".to_string(),
            avatar: Some("https://cdn/a.png".to_string()),
            online: true,
        };
        let mut conv: Conversation = serde_json::from_str(r#"{"_id":"c1"}"#).unwrap();
        conv.decorate(&assistant);
        let display = conv.display.unwrap();
        assert_eq!(display.name, "Dana Reyes");
        assert!(display.online);
    }

    #[test]
    fn test_has_unconfirmed() {
        let mut conv: Conversation = serde_json::from_str(r#"{"_id":"c1"}"#).unwrap();
        assert!(!conv.has_unconfirmed());
        conv.messages.push(Message::pending_user("x"));
        assert!(conv.has_unconfirmed());
    }

    #[test]
    fn test_activity_falls_back_to_last_message() {
        let json = r#"{"_id":"c1","conversation":[
            {"_id":"m1","role":"user","content":"one","timestamp":"2026-03-01T00:00:00Z"}
        ]}"#;
        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conv.activity_at().unwrap().to_rfc3339(), "2026-03-01T00:00:00+00:00");
    }

    #[test]
    fn test_assistant_initials() {
        let mut assistant = AssistantProfile::from_id("a1");
        assistant.name = "dana reyes smith".to_string();
        assert_eq!(assistant.initials(), "DR");
    }

    // ─── API Payload Tests ───────────────────────────────────

    #[test]
    fn test_user_data_with_profile() {
        let json = r#"{"assistant":{"_id":"a1","name":"Dana","online":true},"messages":[{"_id":"c1"}]}"#;
        let data: UserData = serde_json::from_str::<UserDataResponse>(json).unwrap().into();
        let assistant = data.assistant.unwrap();
        assert_eq!(assistant.id, "a1");
        assert_eq!(assistant.name, "Dana");
        assert!(assistant.online);
        assert_eq!(data.conversations.len(), 1);
    }

    #[test]
    fn test_user_data_with_bare_assistant_id() {
        let json = r#"{"assistant":"a9","messages":[]}"#;
        let data: UserData = serde_json::from_str::<UserDataResponse>(json).unwrap().into();
        let assistant = data.assistant.unwrap();
        assert_eq!(assistant.id, "a9");
        assert_eq!(assistant.name, DEFAULT_ASSISTANT_NAME);
        assert!(!assistant.online);
    }

    #[test]
    fn test_assistant_profile_null_fields_default() {
        let json = r#"{"_id":"a2","id":"a2","name":null,"avatar":null,"online":null}"#;
        let assistant: AssistantProfile = serde_json::from_str(json).unwrap();
        assert_eq!(assistant.id, "a2");
        assert_eq!(assistant.name, DEFAULT_ASSISTANT_NAME);
        assert!(assistant.avatar.is_none());
        assert!(!assistant.online);
    }

    #[test]
    fn test_user_data_without_assistant() {
        let json = r#"{"assistant":null,"messages":null}"#;
        let data: UserData = serde_json::from_str::<UserDataResponse>(json).unwrap().into();
        assert!(data.assistant.is_none());
        assert!(data.conversations.is_empty());

        let data: UserData = serde_json::from_str::<UserDataResponse>("{}").unwrap().into();
        assert!(data.assistant.is_none());
    }

    #[test]
    fn test_send_message_request_shape() {
        let req = SendMessageRequest {
            conversation_id: "c1".to_string(),
            role: Role::User,
            content: "Hello".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["messageId"], "c1");
        assert_eq!(value["role"], "user");
        assert_eq!(value["content"], "Hello");
    }

    #[test]
    fn test_create_conversation_shapes() {
        let req = CreateConversationRequest { assistant_id: "a1".to_string() };
        assert_eq!(serde_json::to_value(&req).unwrap()["assistantId"], "a1");

        let resp: CreateConversationResponse =
            serde_json::from_str(r#"{"conversation":{"_id":"c42","assistantId":"a1"}}"#).unwrap();
        assert_eq!(resp.conversation.id, "c42");
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = InboxConfig::default();
        assert_eq!(config.poll_interval_ms, 2000);
        assert_eq!(config.storage.backend, StorageBackendType::Auto);
        assert_eq!(config.storage.token_key, "authToken");
        assert!(!config.api.base_url.is_empty());
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: InboxConfig =
            serde_json::from_str(r#"{"api":{"base_url":"https://jobs.example.com/api/"}}"#).unwrap();
        assert_eq!(config.api.base_url, "https://jobs.example.com/api/");
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(config.theme, ThemeConfig::default());
    }

    #[test]
    fn test_api_endpoint_joining() {
        let api = ApiConfig { base_url: "https://x.test/api/".to_string() };
        assert_eq!(api.endpoint(MESSAGES_PATH), "https://x.test/api/customer/messages");
        let api = ApiConfig { base_url: "https://x.test/api".to_string() };
        assert_eq!(api.endpoint("customer/userdata"), "https://x.test/api/customer/userdata");
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_notice_event_serialization() {
        let event = InboxEvent::Notice {
            kind: NoticeKind::SendFailed,
            message: "offline".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("SendFailed"));
        assert!(json.contains("offline"));
    }

    #[test]
    fn test_notice_labels() {
        assert_eq!(NoticeKind::AuthExpired.label(), "Session expired");
        assert_eq!(NoticeKind::SendFailed.label(), "Message not sent");
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_from_status() {
        assert_eq!(InboxError::from_status(401, ""), InboxError::AuthExpired);
        assert_eq!(InboxError::from_status(403, "forbidden"), InboxError::AuthExpired);
        let err = InboxError::from_status(502, "bad gateway");
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
        assert!(err.is_transient());
        assert!(!InboxError::from_status(400, "bad").is_transient());
    }

    #[test]
    fn test_error_predicates() {
        assert!(InboxError::AuthExpired.is_auth());
        assert!(!InboxError::Network("x".to_string()).is_auth());
        assert!(InboxError::Network("x".to_string()).is_transient());
        assert!(!InboxError::Validation("empty".to_string()).is_transient());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            InboxError::Validation("Message is empty".to_string()).to_string(),
            "Validation error: Message is empty"
        );
        assert_eq!(InboxError::Shutdown.to_string(), "Inbox engine has been shut down");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{bad").unwrap_err();
        let err: InboxError = serde_err.into();
        assert!(matches!(err, InboxError::Serialization(_)));
    }
}
