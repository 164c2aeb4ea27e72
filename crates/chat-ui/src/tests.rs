#[cfg(test)]
mod tests {
    use crate::panels::{chat, dialogs, settings, sidebar};
    use crate::state::*;
    use crate::theme;
    use chat_core::view::{ChatView, HistoryItem, MessageView, PlaceholderView, GREETING};
    use chat_types::api::Credentials;
    use chat_types::config::{ClientConfig, PersistenceMode};
    use chat_types::event::ChatEvent;
    use chat_types::message::Sender;

    fn sample_view() -> ChatView {
        ChatView {
            greeting: None,
            messages: vec![
                MessageView {
                    index: 0,
                    sender: Sender::User,
                    lines: vec!["Hi".to_string()],
                    editable: true,
                },
                MessageView {
                    index: 1,
                    sender: Sender::Bot,
                    lines: vec!["Hello!".to_string(), "How can I help?".to_string()],
                    editable: false,
                },
            ],
            placeholders: vec![PlaceholderView {
                reply_id: 1,
                text: "Typing...".to_string(),
                failed: false,
            }],
            history: vec![
                HistoryItem { index: 0, title: "Hi".to_string(), active: true, visible: true },
                HistoryItem { index: 1, title: "Other".to_string(), active: false, visible: false },
            ],
            revealing: true,
        }
    }

    /// Run one headless frame with the given closure inside a central panel
    fn run_frame(mut f: impl FnMut(&egui::Context, &mut egui::Ui)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| f(ctx, ui));
        });
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new();
        assert!(state.input_text.is_empty());
        assert!(state.search_filter.is_empty());
        assert!(state.account_modal.is_none());
        assert!(state.notice.is_none());
        assert!(!state.show_settings);
        assert!(!state.logged_in);
        assert_eq!(state.status_text, "Ready");
        assert!(!state.is_busy());
        assert!(!state.is_blocked());
    }

    #[test]
    fn test_ui_state_take_input_trims() {
        let mut state = UiState::new();
        state.input_text = "  hello  ".to_string();
        assert_eq!(state.take_input(), Some("hello".to_string()));
        assert!(state.input_text.is_empty());
    }

    #[test]
    fn test_ui_state_take_input_blank_is_kept() {
        let mut state = UiState::new();
        state.input_text = "   ".to_string();
        assert_eq!(state.take_input(), None);
        assert_eq!(state.input_text, "   ");
    }

    #[test]
    fn test_ui_state_process_reply_lifecycle() {
        let mut state = UiState::new();
        state.process_events(vec![
            ChatEvent::ReplyPending { reply_id: 1 },
            ChatEvent::ReplyPending { reply_id: 2 },
        ]);
        assert_eq!(state.pending_replies, 2);
        assert_eq!(state.status_text, "Typing...");
        assert!(state.is_busy());

        state.process_events(vec![ChatEvent::ReplyReceived { reply_id: 2 }]);
        assert!(state.is_busy());
        assert_eq!(state.status_text, "Typing...");

        state.process_events(vec![ChatEvent::ReplyReceived { reply_id: 1 }]);
        assert!(!state.is_busy());
        assert_eq!(state.status_text, "Ready");
    }

    #[test]
    fn test_ui_state_process_reply_failed() {
        let mut state = UiState::new();
        state.process_events(vec![
            ChatEvent::ReplyPending { reply_id: 1 },
            ChatEvent::ReplyFailed { reply_id: 1, message: "Network error: down".to_string() },
        ]);
        assert!(!state.is_busy());
        assert_eq!(state.status_text, "Error: Network error: down");
    }

    #[test]
    fn test_ui_state_stray_reply_does_not_underflow() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::ReplyReceived { reply_id: 9 }]);
        assert_eq!(state.pending_replies, 0);
    }

    #[test]
    fn test_ui_state_notice_blocks() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::Notice { message: "Log in first".to_string() }]);
        assert_eq!(state.notice.as_deref(), Some("Log in first"));
        assert!(state.is_blocked());
    }

    #[test]
    fn test_ui_state_empty_notice_ignored() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::Notice { message: String::new() }]);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_ui_state_session_login_closes_modal() {
        let mut state = UiState::new();
        state.open_account_modal(AccountModal::Login);
        state.account_form.username = "alice".to_string();
        state.account_form.password = "secret".to_string();

        state.process_events(vec![ChatEvent::SessionChanged { logged_in: true }]);

        assert!(state.logged_in);
        assert!(state.account_modal.is_none());
        assert!(state.account_form.password.is_empty());
        assert_eq!(state.status_text, "Logged in");
    }

    #[test]
    fn test_ui_state_session_logout() {
        let mut state = UiState::new();
        state.logged_in = true;
        state.process_events(vec![ChatEvent::SessionChanged { logged_in: false }]);
        assert!(!state.logged_in);
        assert_eq!(state.status_text, "Logged out");
    }

    #[test]
    fn test_ui_state_process_loaded_and_error() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::ConversationsLoaded { count: 3 }]);
        assert_eq!(state.status_text, "3 conversation(s)");

        state.process_events(vec![ChatEvent::Error { message: "HTTP 500: boom".to_string() }]);
        assert_eq!(state.status_text, "Error: HTTP 500: boom");
    }

    #[test]
    fn test_ui_state_created_drops_staged_message_actions() {
        let mut state = UiState::new();
        state.editing = Some(EditDraft { index: 0, text: "x".to_string() });
        state.confirm = Some(Confirm::DeleteMessage(1));
        state.process_events(vec![ChatEvent::ConversationCreated]);
        assert!(state.editing.is_none());
        assert!(state.confirm.is_none());
    }

    #[test]
    fn test_ui_state_reload_drops_staged_message_actions() {
        let mut state = UiState::new();
        state.editing = Some(EditDraft { index: 2, text: "y".to_string() });
        state.confirm = Some(Confirm::DeleteMessage(2));
        state.process_events(vec![ChatEvent::ConversationsLoaded { count: 4 }]);
        assert!(state.editing.is_none());
        assert!(state.confirm.is_none());
        assert!(!state.is_blocked());
    }

    #[test]
    fn test_ui_state_reload_keeps_account_confirm() {
        let mut state = UiState::new();
        state.confirm = Some(Confirm::DeleteAccount);
        state.process_events(vec![ChatEvent::ConversationsLoaded { count: 1 }]);
        assert_eq!(state.confirm, Some(Confirm::DeleteAccount));
    }

    #[test]
    fn test_account_form_credentials_trim_username_only() {
        let form = AccountForm {
            username: " alice ".to_string(),
            password: " pw ".to_string(),
            new_password: String::new(),
        };
        assert_eq!(
            form.credentials(),
            Credentials { username: "alice".to_string(), password: " pw ".to_string() }
        );
    }

    #[test]
    fn test_confirm_actions() {
        assert_eq!(Confirm::DeleteMessage(2).action(), UiAction::DeleteMessage(2));
        assert_eq!(Confirm::DeleteAccount.action(), UiAction::DeleteAccount);
        assert_eq!(Confirm::DeleteMessage(0).prompt(), "Delete this message?");
        assert_eq!(Confirm::DeleteAccount.prompt(), "Are you sure? This cannot be undone.");
    }

    // ─── Theme Tests ─────────────────────────────────────────

    #[test]
    fn test_theme_palette_switch() {
        assert_eq!(*theme::palette(true), theme::DARK);
        assert_eq!(*theme::palette(false), theme::LIGHT);
        assert_ne!(theme::DARK.bg_primary, theme::LIGHT.bg_primary);
    }

    #[test]
    fn test_apply_theme_sets_dark_mode() {
        let ctx = egui::Context::default();
        theme::apply_theme(&ctx, true);
        assert!(ctx.style().visuals.dark_mode);
        theme::apply_theme(&ctx, false);
        assert!(!ctx.style().visuals.dark_mode);
    }

    // ─── Panel Tests ─────────────────────────────────────────

    #[test]
    fn test_chat_panel_renders_without_action() {
        let view = sample_view();
        let mut state = UiState::new();
        run_frame(|_, ui| {
            assert!(chat::chat_panel(ui, &view, &mut state).is_none());
        });
    }

    #[test]
    fn test_chat_panel_renders_greeting() {
        let view = ChatView {
            greeting: Some(GREETING),
            messages: vec![],
            placeholders: vec![],
            history: vec![],
            revealing: false,
        };
        let mut state = UiState::new();
        run_frame(|_, ui| {
            assert!(chat::chat_panel(ui, &view, &mut state).is_none());
        });
    }

    #[test]
    fn test_sidebar_renders_without_action() {
        let view = sample_view();
        let mut state = UiState::new();
        run_frame(|_, ui| {
            assert!(sidebar::sidebar_panel(ui, &view, &mut state).is_none());
        });
        assert!(!state.show_settings);
    }

    #[test]
    fn test_dialogs_none_when_idle() {
        let mut state = UiState::new();
        run_frame(|ctx, _| {
            assert!(dialogs::dialogs(ctx, &mut state).is_none());
        });
    }

    #[test]
    fn test_dialogs_keep_notice_until_dismissed() {
        let mut state = UiState::new();
        state.notice = Some("Start a new chat first".to_string());
        run_frame(|ctx, _| {
            assert!(dialogs::dialogs(ctx, &mut state).is_none());
        });
        assert_eq!(state.notice.as_deref(), Some("Start a new chat first"));
    }

    #[test]
    fn test_settings_panel_idle_frame() {
        let mut config = ClientConfig::for_mode(PersistenceMode::Local);
        let before = config.clone();
        run_frame(|_, ui| {
            let action = settings::settings_panel(ui, &mut config, None, true);
            assert_eq!(action, settings::SettingsAction::None);
        });
        assert_eq!(config, before);
    }

    #[test]
    fn test_settings_panel_disabled_while_dialog_open() {
        let mut state = UiState::new();
        state.confirm = Some(Confirm::DeleteMessage(0));
        assert!(state.is_blocked());

        let mut config = ClientConfig::for_mode(PersistenceMode::Remote);
        let before = config.clone();
        let feedback = settings::SaveFeedback { message: "Saved".to_string(), success: true };
        run_frame(|_, ui| {
            let action = settings::settings_panel(ui, &mut config, Some(&feedback), !state.is_blocked());
            assert_eq!(action, settings::SettingsAction::None);
        });
        assert_eq!(config, before);
    }

    #[test]
    fn test_persistence_descriptions_differ() {
        assert!(settings::persistence_description(PersistenceMode::Remote).contains("logging in"));
        assert!(settings::persistence_description(PersistenceMode::Local).contains("browser"));
    }
}
