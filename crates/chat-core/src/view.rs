//! Pure projection of [`ChatState`] into what the UI draws.
//!
//! Nothing here touches egui; the panels in `chat-ui` only walk a
//! [`ChatView`].

use chat_types::message::Sender;
use crate::state::{ChatState, ReplyStatus};

/// Shown instead of the message list when there is nothing to show
pub const GREETING: &str = "OK is here";
pub const TYPING_PLACEHOLDER: &str = "Typing...";
pub const FAILED_REPLY_TEXT: &str = "Error fetching response";

#[derive(Debug, Clone, PartialEq)]
pub struct ChatView {
    pub greeting: Option<&'static str>,
    pub messages: Vec<MessageView>,
    pub placeholders: Vec<PlaceholderView>,
    pub history: Vec<HistoryItem>,
    /// A reply is being revealed; the UI offers a stop control
    pub revealing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub index: usize,
    pub sender: Sender,
    pub lines: Vec<String>,
    /// User messages get edit/delete affordances
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderView {
    pub reply_id: u64,
    pub text: String,
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItem {
    pub index: usize,
    pub title: String,
    pub active: bool,
    /// False when filtered out by the sidebar search
    pub visible: bool,
}

impl ChatView {
    pub fn visible_history(&self) -> impl Iterator<Item = &HistoryItem> {
        self.history.iter().filter(|h| h.visible)
    }
}

pub fn render(state: &ChatState, filter: &str) -> ChatView {
    let active_key = state.active_key();
    let active_index = state.active_index();

    let history = state
        .conversations()
        .enumerate()
        .map(|(index, conv)| HistoryItem {
            index,
            title: conv.title.clone(),
            active: Some(index) == active_index,
            visible: conv.title_matches(filter),
        })
        .collect();

    let reveal = state
        .reveal()
        .filter(|r| Some(r.conversation) == active_key);

    let messages: Vec<MessageView> = state
        .active()
        .map(|conv| {
            conv.messages
                .iter()
                .enumerate()
                .map(|(index, msg)| {
                    let text = match reveal {
                        Some(r) if r.message_index == index => r.visible(&msg.text),
                        _ => msg.text.as_str(),
                    };
                    MessageView {
                        index,
                        sender: msg.sender,
                        lines: text.split('\n').map(str::to_string).collect(),
                        editable: msg.is_user(),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let placeholders = state
        .pending()
        .iter()
        .filter(|p| Some(p.conversation) == active_key)
        .map(|p| match &p.status {
            ReplyStatus::Waiting => PlaceholderView {
                reply_id: p.id,
                text: TYPING_PLACEHOLDER.to_string(),
                failed: false,
            },
            ReplyStatus::Failed(text) => PlaceholderView {
                reply_id: p.id,
                text: text.clone(),
                failed: true,
            },
        })
        .collect();

    ChatView {
        greeting: messages.is_empty().then_some(GREETING),
        messages,
        placeholders,
        history,
        revealing: reveal.is_some(),
    }
}
