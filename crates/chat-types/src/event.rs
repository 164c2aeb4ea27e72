use serde::{Deserialize, Serialize};

/// Events emitted by the conversation controller.
/// UI subscribes to these for status lines and blocking notices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// Conversations were (re)loaded from the store
    ConversationsLoaded { count: usize },

    /// A fresh conversation replaced the loaded list
    ConversationCreated,

    /// A reply request is in flight
    ReplyPending { reply_id: u64 },

    /// The bot answered
    ReplyReceived { reply_id: u64 },

    /// The reply request failed; the placeholder now shows an error
    ReplyFailed { reply_id: u64, message: String },

    /// Something the user must acknowledge (server message, precondition)
    Notice { message: String },

    /// Login state changed
    SessionChanged { logged_in: bool },

    /// A background persistence call failed
    Error { message: String },
}
