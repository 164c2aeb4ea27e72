//! Request and response bodies exchanged with the chat server.

use serde::{Deserialize, Serialize};
use crate::conversation::Conversation;

/// `POST /create_chat` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChatResponse {
    pub success: bool,
    #[serde(default)]
    pub chat: Option<Conversation>,
}

/// `POST /ask` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub message: String,
}

/// `POST /ask` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub reply: String,
}

/// `POST /chat/{id}/edit_message` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditMessageRequest {
    pub index: usize,
    pub text: String,
}

/// `POST /chat/{id}/delete_message` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteMessageRequest {
    pub index: usize,
}

/// Login and signup body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// `POST /change_password` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

/// Generic `{ success, message }` reply used by every account endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
