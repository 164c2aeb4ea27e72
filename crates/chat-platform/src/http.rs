//! HTTP adapter for the chat server.
//!
//! Speaks the server's JSON endpoints with browser `fetch()` via gloo-net.
//! Requests carry same-origin cookies so the server session applies.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCredentials;

use chat_core::ports::{AccountPort, ChatBackendPort};
use chat_types::{
    ChatError, Result,
    api::{
        AskRequest, AskResponse, AuthResponse, ChangePasswordRequest, CreateChatResponse,
        Credentials, DeleteMessageRequest, EditMessageRequest,
    },
    config::ClientConfig,
    conversation::{Conversation, ConversationId},
    message::Message,
};

pub struct HttpChatBackend {
    config: ClientConfig,
}

impl HttpChatBackend {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        Request::get(&self.url(path)).credentials(RequestCredentials::SameOrigin)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        Request::post(&self.url(path)).credentials(RequestCredentials::SameOrigin)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response> {
        let response = self
            .post(path)
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| ChatError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        check_status(response).await
    }

    async fn post_empty(&self, path: &str) -> Result<Response> {
        let response = self
            .post(path)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(ChatError::Http { status, body })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| ChatError::Serialization(e.to_string()))
}

#[async_trait(?Send)]
impl ChatBackendPort for HttpChatBackend {
    async fn list_chats(&self) -> Result<Vec<Conversation>> {
        let response = self
            .get("/get_chats")
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        read_json(check_status(response).await?).await
    }

    async fn create_chat(&self) -> Result<CreateChatResponse> {
        read_json(self.post_empty("/create_chat").await?).await
    }

    async fn ask(&self, message: &str) -> Result<String> {
        let body = AskRequest {
            message: message.to_string(),
        };
        let data: AskResponse = read_json(self.post_json("/ask", &body).await?).await?;
        Ok(data.reply)
    }

    async fn add_message(&self, id: ConversationId, message: &Message) -> Result<()> {
        self.post_json(&format!("/chat/{}/add_message", id), message)
            .await?;
        Ok(())
    }

    async fn edit_message(&self, id: ConversationId, index: usize, text: &str) -> Result<()> {
        let body = EditMessageRequest {
            index,
            text: text.to_string(),
        };
        self.post_json(&format!("/chat/{}/edit_message", id), &body)
            .await?;
        Ok(())
    }

    async fn delete_message(&self, id: ConversationId, index: usize) -> Result<()> {
        let body = DeleteMessageRequest { index };
        self.post_json(&format!("/chat/{}/delete_message", id), &body)
            .await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl AccountPort for HttpChatBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        read_json(self.post_json("/login", credentials).await?).await
    }

    async fn signup(&self, credentials: &Credentials) -> Result<AuthResponse> {
        read_json(self.post_json("/signup", credentials).await?).await
    }

    async fn change_password(&self, password: &str) -> Result<AuthResponse> {
        let body = ChangePasswordRequest {
            password: password.to_string(),
        };
        read_json(self.post_json("/change_password", &body).await?).await
    }

    async fn delete_account(&self) -> Result<AuthResponse> {
        read_json(self.post_empty("/delete_account").await?).await
    }

    async fn logout(&self) -> Result<()> {
        // The server answers with a redirect; only reachability matters
        self.get("/logout")
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        Ok(())
    }

    fn oauth_login_url(&self) -> String {
        self.url("/login/google")
    }
}
