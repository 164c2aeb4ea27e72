#[cfg(test)]
mod tests {
    use crate::message::*;
    use crate::conversation::*;
    use crate::api::*;
    use crate::event::*;
    use crate::config::*;
    use crate::error::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "Hello");
        assert!(msg.is_user());
    }

    #[test]
    fn test_message_bot() {
        let msg = Message::bot("Hi there");
        assert_eq!(msg.sender, Sender::Bot);
        assert!(!msg.is_user());
    }

    #[test]
    fn test_message_wire_format() {
        let json = serde_json::to_string(&Message::user("ping")).unwrap();
        assert_eq!(json, r#"{"sender":"user","text":"ping"}"#);

        let msg: Message = serde_json::from_str(r#"{"sender":"bot","text":"pong"}"#).unwrap();
        assert_eq!(msg, Message::bot("pong"));
    }

    #[test]
    fn test_sender_labels() {
        assert_eq!(Sender::User.label(), "You");
        assert_eq!(Sender::Bot.label(), "Bot");
    }

    // ─── Conversation Tests ──────────────────────────────────

    #[test]
    fn test_conversation_new_has_default_title() {
        let conv = Conversation::new(None);
        assert_eq!(conv.title, DEFAULT_TITLE);
        assert!(conv.has_default_title());
        assert!(conv.messages.is_empty());
        assert!(conv.id.is_none());
    }

    #[test]
    fn test_conversation_server_shape() {
        let json = r#"{"db_id":7,"title":"Rust","messages":[{"sender":"user","text":"hi"}]}"#;
        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conv.id, Some(ConversationId(7)));
        assert_eq!(conv.title, "Rust");
        assert_eq!(conv.messages.len(), 1);
    }

    #[test]
    fn test_conversation_missing_fields_default() {
        let conv: Conversation = serde_json::from_str("{}").unwrap();
        assert!(conv.id.is_none());
        assert_eq!(conv.title, DEFAULT_TITLE);
        assert!(conv.messages.is_empty());
    }

    #[test]
    fn test_conversation_without_id_omits_field() {
        let json = serde_json::to_string(&Conversation::new(None)).unwrap();
        assert!(!json.contains("db_id"));
    }

    #[test]
    fn test_title_matches_case_insensitive() {
        let mut conv = Conversation::new(None);
        conv.title = "Learning Rust".to_string();
        assert!(conv.title_matches("rust"));
        assert!(conv.title_matches("LEARN"));
        assert!(conv.title_matches(""));
        assert!(!conv.title_matches("python"));
    }

    #[test]
    fn test_derive_title_short_text_kept() {
        assert_eq!(derive_title("hello", TITLE_MAX_CHARS), "hello");
    }

    #[test]
    fn test_derive_title_exactly_max_kept() {
        let text = "a".repeat(30);
        assert_eq!(derive_title(&text, 30), text);
    }

    #[test]
    fn test_derive_title_long_text_truncated() {
        let text = "abcdefghijklmnopqrstuvwxyz0123456789";
        assert_eq!(derive_title(text, 30), "abcdefghijklmnopqrstuvwxyz0123...");
    }

    #[test]
    fn test_derive_title_counts_chars_not_bytes() {
        let text = "é".repeat(31);
        let title = derive_title(&text, 30);
        assert_eq!(title, format!("{}...", "é".repeat(30)));
    }

    #[test]
    fn test_conversation_id_display() {
        assert_eq!(ConversationId(42).to_string(), "42");
    }

    #[test]
    fn test_conversation_id_from_timestamp_is_positive() {
        assert!(ConversationId::from_timestamp().0 > 0);
    }

    // ─── API Payload Tests ───────────────────────────────────

    #[test]
    fn test_create_chat_response() {
        let json = r#"{"success":true,"chat":{"db_id":3,"title":"New Conversation","messages":[]}}"#;
        let resp: CreateChatResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.chat.unwrap().id, Some(ConversationId(3)));
    }

    #[test]
    fn test_create_chat_failure_without_chat() {
        let resp: CreateChatResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.chat.is_none());
    }

    #[test]
    fn test_auth_response_missing_message() {
        let resp: AuthResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(resp.success);
        assert!(resp.message.is_empty());
    }

    #[test]
    fn test_request_bodies() {
        let edit = serde_json::to_value(EditMessageRequest { index: 2, text: "x".to_string() }).unwrap();
        assert_eq!(edit, serde_json::json!({"index": 2, "text": "x"}));

        let del = serde_json::to_value(DeleteMessageRequest { index: 0 }).unwrap();
        assert_eq!(del, serde_json::json!({"index": 0}));

        let creds = serde_json::to_value(Credentials {
            username: "ann".to_string(),
            password: "pw".to_string(),
        })
        .unwrap();
        assert_eq!(creds, serde_json::json!({"username": "ann", "password": "pw"}));

        let ask = serde_json::to_value(AskRequest { message: "hi".to_string() }).unwrap();
        assert_eq!(ask, serde_json::json!({"message": "hi"}));
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_chat_event_serialization() {
        let event = ChatEvent::ReplyFailed {
            reply_id: 4,
            message: "offline".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("ReplyFailed"));
        assert!(json.contains("offline"));
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.persistence, PersistenceMode::Remote);
        assert!(config.api_base.is_empty());
        assert!(!config.typing.enabled);
        assert_eq!(config.title_max_chars, 30);
    }

    #[test]
    fn test_config_for_local_mode_enables_typing() {
        let config = ClientConfig::for_mode(PersistenceMode::Local);
        assert_eq!(config.persistence, PersistenceMode::Local);
        assert!(config.typing.enabled);
    }

    #[test]
    fn test_config_endpoint_join() {
        let mut config = ClientConfig::default();
        assert_eq!(config.endpoint("/ask"), "/ask");
        config.api_base = "https://chat.example.com/".to_string();
        assert_eq!(config.endpoint("/ask"), "https://chat.example.com/ask");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = ClientConfig::for_mode(PersistenceMode::Local);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_persistence_mode_parse() {
        assert_eq!(PersistenceMode::parse("local"), Some(PersistenceMode::Local));
        assert_eq!(PersistenceMode::parse(" Remote "), Some(PersistenceMode::Remote));
        assert_eq!(PersistenceMode::parse("cloud"), None);
        assert_eq!(PersistenceMode::all().len(), 2);
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = ChatError::Network("offline".to_string());
        assert_eq!(err.to_string(), "Network error: offline");

        let err = ChatError::Http { status: 500, body: "boom".to_string() };
        assert_eq!(err.to_string(), "HTTP 500: boom");

        let err = ChatError::Rejected("Username exists".to_string());
        assert_eq!(err.to_string(), "Username exists");

        assert_eq!(ChatError::NotLoggedIn.to_string(), "Log in first");

        let err = ChatError::IndexOutOfRange { index: 5, len: 2 };
        assert_eq!(err.to_string(), "Message index 5 out of range (len 2)");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: ChatError = serde_err.into();
        assert!(matches!(err, ChatError::Serialization(_)));
    }
}
