//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `chat-core` (pure Rust).
//! Implementations live in `chat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use chat_types::{
    Result,
    api::{AuthResponse, CreateChatResponse, Credentials},
    conversation::{Conversation, ConversationId},
    message::Message,
};

// ─── Chat Backend Port ───────────────────────────────────────

/// The server-side chat store plus the reply endpoint.
#[async_trait(?Send)]
pub trait ChatBackendPort {
    /// `GET /get_chats`
    async fn list_chats(&self) -> Result<Vec<Conversation>>;

    /// `POST /create_chat`
    async fn create_chat(&self) -> Result<CreateChatResponse>;

    /// `POST /ask`, returns the bot's reply text
    async fn ask(&self, message: &str) -> Result<String>;

    /// `POST /chat/{id}/add_message`
    async fn add_message(&self, id: ConversationId, message: &Message) -> Result<()>;

    /// `POST /chat/{id}/edit_message`
    async fn edit_message(&self, id: ConversationId, index: usize, text: &str) -> Result<()>;

    /// `POST /chat/{id}/delete_message`
    async fn delete_message(&self, id: ConversationId, index: usize) -> Result<()>;
}

// ─── Account Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait AccountPort {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse>;

    async fn signup(&self, credentials: &Credentials) -> Result<AuthResponse>;

    async fn change_password(&self, password: &str) -> Result<AuthResponse>;

    async fn delete_account(&self) -> Result<AuthResponse>;

    async fn logout(&self) -> Result<()>;

    /// Where the browser should go to start the OAuth flow
    fn oauth_login_url(&self) -> String;
}

// ─── Storage Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;
}
