//! Main egui application: composes the panels and drives the controllers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use egui::{self, CentralPanel, SidePanel};

use chat_core::account::AccountController;
use chat_core::controller::{ConversationController, Session};
use chat_core::event_bus::EventBus;
use chat_core::ports::{AccountPort, ChatBackendPort, StoragePort};
use chat_core::preferences;
use chat_core::store::store_for_mode;
use chat_platform::http::HttpChatBackend;
use chat_platform::page::{self, PageContext};
use chat_platform::storage::auto_detect_storage;
use chat_types::config::{ClientConfig, PersistenceMode};
use chat_types::event::ChatEvent;
use chat_ui::panels::{account, chat, dialogs, settings, sidebar};
use chat_ui::panels::settings::{SaveFeedback, SettingsAction};
use chat_ui::state::{UiAction, UiState};
use chat_ui::theme;

/// Preferences read from storage after startup
struct Restored {
    config: Option<ClientConfig>,
    dark_mode: bool,
}

/// The main application state
pub struct ChatApp {
    ui_state: UiState,
    config: ClientConfig,
    /// Edited in the settings panel, applied on Save
    config_draft: ClientConfig,
    save_feedback: Option<SaveFeedback>,
    page: PageContext,
    event_bus: EventBus,
    storage: Rc<dyn StoragePort>,
    session: Session,
    conversations: ConversationController,
    account: AccountController,
    restored: Rc<RefCell<Option<Restored>>>,
    reveal_running: Rc<Cell<bool>>,
    close_account_modal: Rc<Cell<bool>>,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let page = PageContext::from_document();
        log::info!(
            "Page context: logged_in={}, persistence={:?}",
            page.logged_in,
            page.persistence
        );

        let config = ClientConfig::for_mode(page.persistence.unwrap_or(PersistenceMode::Remote));
        let storage = auto_detect_storage();
        let event_bus = EventBus::new();
        let session = Session::new(page.logged_in);
        let (conversations, account) =
            Self::build_controllers(&config, &storage, &session, &event_bus);

        let mut ui_state = UiState::new();
        ui_state.logged_in = page.logged_in;

        let restored = Rc::new(RefCell::new(None));
        Self::restore_preferences(storage.clone(), restored.clone());

        Self {
            ui_state,
            config_draft: config.clone(),
            config,
            save_feedback: None,
            page,
            event_bus,
            storage,
            session,
            conversations,
            account,
            restored,
            reveal_running: Rc::new(Cell::new(false)),
            close_account_modal: Rc::new(Cell::new(false)),
            first_frame: true,
        }
    }

    fn build_controllers(
        config: &ClientConfig,
        storage: &Rc<dyn StoragePort>,
        session: &Session,
        event_bus: &EventBus,
    ) -> (ConversationController, AccountController) {
        let http = Rc::new(HttpChatBackend::new(config.clone()));
        let backend: Rc<dyn ChatBackendPort> = http.clone();
        let account_port: Rc<dyn AccountPort> = http;

        let store = store_for_mode(config.persistence, backend.clone(), storage.clone());
        let conversations = ConversationController::new(
            config.clone(),
            store,
            backend,
            session.clone(),
            event_bus.clone(),
        );
        let account = AccountController::new(account_port, session.clone(), event_bus.clone());
        (conversations, account)
    }

    /// Read the saved config and theme (async); picked up on a later frame
    fn restore_preferences(storage: Rc<dyn StoragePort>, slot: Rc<RefCell<Option<Restored>>>) {
        wasm_bindgen_futures::spawn_local(async move {
            let config = match preferences::load_config(storage.as_ref()).await {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Ignoring stored config: {}", e);
                    None
                }
            };
            let dark_mode = preferences::load_dark_mode(storage.as_ref())
                .await
                .unwrap_or(false);
            *slot.borrow_mut() = Some(Restored { config, dark_mode });
        });
    }

    /// Apply restored preferences once, then load conversations
    fn apply_restored(&mut self, ctx: &egui::Context) {
        let Some(restored) = self.restored.borrow_mut().take() else {
            return;
        };

        self.ui_state.dark_mode = restored.dark_mode;
        theme::apply_theme(ctx, restored.dark_mode);

        if let Some(mut config) = restored.config {
            // The host page decides where conversations live
            if let Some(mode) = self.page.persistence {
                config.persistence = mode;
            }
            log::info!("Config restored from storage");
            self.apply_config(config);
        }

        self.spawn_load(ctx);
    }

    fn apply_config(&mut self, config: ClientConfig) {
        let (conversations, account) =
            Self::build_controllers(&config, &self.storage, &self.session, &self.event_bus);
        self.conversations = conversations;
        self.account = account;
        self.config_draft = config.clone();
        self.config = config;
    }

    fn save_settings(&mut self, ctx: &egui::Context) {
        let mut config = self.config_draft.clone();
        if let Some(mode) = self.page.persistence {
            config.persistence = mode;
        }
        self.apply_config(config);
        self.save_feedback = Some(SaveFeedback {
            message: "Saved".to_string(),
            success: true,
        });

        let storage = self.storage.clone();
        let config = self.config.clone();
        let event_bus = self.event_bus.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match preferences::save_config(storage.as_ref(), &config).await {
                Ok(()) => log::info!("Config saved to storage"),
                Err(e) => {
                    log::warn!("Failed to save config: {}", e);
                    event_bus.emit(ChatEvent::Error { message: e.to_string() });
                }
            }
        });

        self.spawn_load(ctx);
    }

    fn spawn_load(&self, ctx: &egui::Context) {
        let conversations = self.conversations.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = conversations.load().await {
                log::error!("Failed to load conversations: {}", e);
                conversations.clear();
            }
            ctx.request_repaint();
        });
    }

    /// React to events the UI state cannot handle alone
    fn handle_events(&mut self, events: &[ChatEvent], ctx: &egui::Context) {
        for event in events {
            if let ChatEvent::SessionChanged { logged_in } = event {
                if *logged_in {
                    self.spawn_load(ctx);
                } else {
                    self.conversations.clear();
                }
            }
        }
    }

    /// Keep one timer loop running while a reply is being revealed
    fn drive_reveal(&self, ctx: &egui::Context) {
        if self.reveal_running.get() || !self.conversations.is_revealing() {
            return;
        }
        self.reveal_running.set(true);

        let conversations = self.conversations.clone();
        let running = self.reveal_running.clone();
        let tick_ms = self.config.typing.tick_ms.max(1);
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            loop {
                gloo_timers::future::TimeoutFuture::new(tick_ms).await;
                let more = conversations.tick_reveal();
                ctx.request_repaint();
                if !more {
                    break;
                }
            }
            running.set(false);
        });
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        let dark = !self.ui_state.dark_mode;
        self.ui_state.dark_mode = dark;
        theme::apply_theme(ctx, dark);

        let storage = self.storage.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = preferences::save_dark_mode(storage.as_ref(), dark).await {
                log::warn!("Failed to save theme: {}", e);
            }
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx, self.ui_state.dark_mode);
            self.first_frame = false;
        }
        self.apply_restored(ctx);

        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.handle_events(&events, ctx);
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if self.close_account_modal.replace(false) {
            self.ui_state.close_account_modal();
            self.ui_state.account_form.clear();
        }

        self.drive_reveal(ctx);

        let view = self.conversations.view(&self.ui_state.search_filter);
        let mut actions = Vec::new();

        // ── Sidebar ──────────────────────────────────────────
        SidePanel::left("history_panel")
            .min_width(200.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                actions.extend(sidebar::sidebar_panel(ui, &view, &mut self.ui_state));
            });

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            let enabled = !self.ui_state.is_blocked();
            SidePanel::right("settings_panel")
                .min_width(260.0)
                .max_width(340.0)
                .show(ctx, |ui| {
                    match settings::settings_panel(
                        ui,
                        &mut self.config_draft,
                        self.save_feedback.as_ref(),
                        enabled,
                    ) {
                        SettingsAction::SaveClicked => self.save_settings(ctx),
                        SettingsAction::Changed => self.save_feedback = None,
                        SettingsAction::None => {}
                    }
                });
        }

        // ── Main content ─────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            actions.extend(chat::chat_panel(ui, &view, &mut self.ui_state));
        });

        // ── Modals ───────────────────────────────────────────
        actions.extend(account::account_modal(ctx, &mut self.ui_state));
        actions.extend(dialogs::dialogs(ctx, &mut self.ui_state));

        for action in actions {
            self.dispatch(action, ctx);
        }
    }
}

impl ChatApp {
    /// Turn a UI action into controller work. Async work is spawned and
    /// reports back through the event bus.
    fn dispatch(&mut self, action: UiAction, ctx: &egui::Context) {
        match action {
            UiAction::SelectConversation(index) => {
                if let Err(e) = self.conversations.select_conversation(index) {
                    log::warn!("Select failed: {}", e);
                }
            }
            UiAction::StopReveal => self.conversations.stop_reveal(),
            UiAction::ToggleTheme => self.toggle_theme(ctx),
            UiAction::OAuthLogin => {
                let url = self.account.oauth_login_url();
                log::info!("Redirecting to {}", url);
                if let Err(e) = page::navigate(&url) {
                    log::error!("OAuth redirect failed: {}", e);
                    self.event_bus.notice(e.to_string());
                }
            }
            UiAction::Send(text) => {
                let conversations = self.conversations.clone();
                self.spawn(ctx, async move {
                    conversations.send_message(&text).await.map(|_| ())
                });
            }
            UiAction::EditMessage { index, text } => {
                let conversations = self.conversations.clone();
                self.spawn(ctx, async move { conversations.edit_message(index, &text).await });
            }
            UiAction::DeleteMessage(index) => {
                let conversations = self.conversations.clone();
                self.spawn(ctx, async move { conversations.delete_message(index).await });
            }
            UiAction::NewChat => {
                let conversations = self.conversations.clone();
                self.spawn(ctx, async move { conversations.create_conversation().await });
            }
            UiAction::DeleteConversation(index) => {
                let conversations = self.conversations.clone();
                self.spawn(ctx, async move { conversations.delete_conversation(index).await });
            }
            UiAction::Login(credentials) => {
                let account = self.account.clone();
                self.spawn(ctx, async move { account.login(&credentials).await.map(|_| ()) });
            }
            UiAction::Signup(credentials) => {
                let account = self.account.clone();
                self.spawn(ctx, async move { account.signup(&credentials).await.map(|_| ()) });
            }
            UiAction::ChangePassword(password) => {
                let account = self.account.clone();
                let close = self.close_account_modal.clone();
                self.spawn(ctx, async move {
                    account
                        .change_password(&password)
                        .await
                        .map(|changed| if changed { close.set(true) })
                });
            }
            UiAction::DeleteAccount => {
                let account = self.account.clone();
                let close = self.close_account_modal.clone();
                self.spawn(ctx, async move {
                    account
                        .delete_account()
                        .await
                        .map(|deleted| if deleted { close.set(true) })
                });
            }
            UiAction::Logout => {
                let account = self.account.clone();
                let close = self.close_account_modal.clone();
                self.spawn(ctx, async move {
                    account.logout().await.map(|()| close.set(true))
                });
            }
        }
    }

    /// Run a controller future; failures are logged and shown in the status line
    fn spawn(
        &self,
        ctx: &egui::Context,
        task: impl std::future::Future<Output = chat_types::Result<()>> + 'static,
    ) {
        let event_bus = self.event_bus.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = task.await {
                log::error!("Action failed: {}", e);
                event_bus.emit(ChatEvent::Error { message: e.to_string() });
            }
            ctx.request_repaint();
        });
    }
}
