use std::fmt;

use serde::{Deserialize, Serialize};
use crate::message::Message;

/// Title given to every conversation until its first message is sent
pub const DEFAULT_TITLE: &str = "New Conversation";

/// Titles derived from the first message are cut to this many characters
pub const TITLE_MAX_CHARS: usize = 30;

/// Persistent identifier of a conversation.
/// Server-assigned row id, or a client-generated millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub i64);

impl ConversationId {
    /// Client-side id for conversations that never touch the server
    pub fn from_timestamp() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A titled, ordered sequence of messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(rename = "db_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ConversationId>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Conversation {
    pub fn new(id: Option<ConversationId>) -> Self {
        Self {
            id,
            title: default_title(),
            messages: Vec::new(),
        }
    }

    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_TITLE
    }

    /// Case-insensitive substring match against the title
    pub fn title_matches(&self, filter: &str) -> bool {
        self.title.to_lowercase().contains(&filter.to_lowercase())
    }
}

/// Derive a conversation title from the first message sent in it.
///
/// Counts characters, not bytes, so multi-byte text is never split mid-codepoint.
pub fn derive_title(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
