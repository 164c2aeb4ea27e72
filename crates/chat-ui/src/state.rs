//! UI-level state: input fields, open dialogs, status line.
//! Conversation data is not kept here; panels render the controller's
//! `ChatView` each frame.

use chat_types::api::Credentials;
use chat_types::event::ChatEvent;

/// Something the user asked for. The app layer turns these into
/// controller calls.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Send(String),
    EditMessage { index: usize, text: String },
    DeleteMessage(usize),
    NewChat,
    SelectConversation(usize),
    DeleteConversation(usize),
    StopReveal,
    Login(Credentials),
    Signup(Credentials),
    OAuthLogin,
    ChangePassword(String),
    DeleteAccount,
    Logout,
    ToggleTheme,
}

/// Which account modal is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountModal {
    Login,
    Signup,
    Profile,
}

/// Destructive actions wait for a yes/no
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    DeleteMessage(usize),
    DeleteAccount,
}

impl Confirm {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirm::DeleteMessage(_) => "Delete this message?",
            Confirm::DeleteAccount => "Are you sure? This cannot be undone.",
        }
    }

    pub fn action(&self) -> UiAction {
        match self {
            Confirm::DeleteMessage(index) => UiAction::DeleteMessage(*index),
            Confirm::DeleteAccount => UiAction::DeleteAccount,
        }
    }
}

/// In-progress edit of a user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct AccountForm {
    pub username: String,
    pub password: String,
    pub new_password: String,
}

impl AccountForm {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        }
    }

    /// Drop everything typed into the form, passwords included
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct UiState {
    pub input_text: String,
    pub search_filter: String,
    pub account_modal: Option<AccountModal>,
    pub account_form: AccountForm,
    /// Blocking notice; nothing else is clickable until dismissed
    pub notice: Option<String>,
    pub confirm: Option<Confirm>,
    pub editing: Option<EditDraft>,
    pub show_settings: bool,
    pub dark_mode: bool,
    pub logged_in: bool,
    /// Replies still in flight
    pub pending_replies: usize,
    pub status_text: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            search_filter: String::new(),
            account_modal: None,
            account_form: AccountForm::default(),
            notice: None,
            confirm: None,
            editing: None,
            show_settings: false,
            dark_mode: false,
            logged_in: false,
            pending_replies: 0,
            status_text: "Ready".to_string(),
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::ConversationsLoaded { count } => {
                    self.status_text = format!("{} conversation(s)", count);
                    self.drop_staged();
                }
                ChatEvent::ConversationCreated => {
                    self.status_text = "New conversation".to_string();
                    self.drop_staged();
                }
                ChatEvent::ReplyPending { .. } => {
                    self.pending_replies += 1;
                    self.status_text = "Typing...".to_string();
                }
                ChatEvent::ReplyReceived { .. } => {
                    self.finish_reply();
                }
                ChatEvent::ReplyFailed { message, .. } => {
                    self.finish_reply();
                    self.status_text = format!("Error: {}", message);
                }
                ChatEvent::Notice { message } => {
                    if !message.is_empty() {
                        self.notice = Some(message);
                    }
                }
                ChatEvent::SessionChanged { logged_in } => {
                    self.logged_in = logged_in;
                    self.account_form.clear();
                    if logged_in {
                        self.account_modal = None;
                    }
                    self.status_text = if logged_in { "Logged in" } else { "Logged out" }.to_string();
                }
                ChatEvent::Error { message } => {
                    self.status_text = format!("Error: {}", message);
                }
            }
        }
    }

    /// Staged edits and deletes point at message indices of a conversation
    /// that is no longer the one shown
    fn drop_staged(&mut self) {
        self.editing = None;
        if matches!(self.confirm, Some(Confirm::DeleteMessage(_))) {
            self.confirm = None;
        }
    }

    fn finish_reply(&mut self) {
        self.pending_replies = self.pending_replies.saturating_sub(1);
        if self.pending_replies == 0 {
            self.status_text = "Ready".to_string();
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending_replies > 0
    }

    /// A modal dialog is up and the rest of the UI should not react
    pub fn is_blocked(&self) -> bool {
        self.notice.is_some() || self.confirm.is_some() || self.editing.is_some()
    }

    /// Take the trimmed input for sending; blank input stays put
    pub fn take_input(&mut self) -> Option<String> {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.input_text.clear();
        Some(text)
    }

    pub fn open_account_modal(&mut self, modal: AccountModal) {
        self.account_modal = Some(modal);
    }

    pub fn close_account_modal(&mut self) {
        self.account_modal = None;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
