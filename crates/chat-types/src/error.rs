use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ChatError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The server answered `success: false`
    #[error("{0}")]
    Rejected(String),

    #[error("Log in first")]
    NotLoggedIn,

    #[error("No active conversation")]
    NoActiveConversation,

    #[error("Message index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}
