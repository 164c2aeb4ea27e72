//! Server-backed store. Every message mutation on a conversation with a
//! server id is mirrored with one POST; whole-conversation deletion stays
//! client-side because the server has no endpoint for it.

use std::rc::Rc;
use async_trait::async_trait;
use chat_types::{ChatError, Result, conversation::Conversation};
use crate::ports::ChatBackendPort;
use super::{Change, ConversationStore};

pub struct RemoteStore {
    backend: Rc<dyn ChatBackendPort>,
}

impl RemoteStore {
    pub fn new(backend: Rc<dyn ChatBackendPort>) -> Self {
        Self { backend }
    }
}

#[async_trait(?Send)]
impl ConversationStore for RemoteStore {
    async fn load(&self) -> Result<Vec<Conversation>> {
        self.backend.list_chats().await
    }

    async fn create(&self) -> Result<Conversation> {
        let response = self.backend.create_chat().await?;
        match response.chat {
            Some(chat) if response.success => Ok(chat),
            _ => Err(ChatError::Rejected("Error creating chat".to_string())),
        }
    }

    async fn persist(
        &self,
        _all: &[Conversation],
        conversation: &Conversation,
        change: &Change,
    ) -> Result<()> {
        let Some(id) = conversation.id else {
            log::debug!("Conversation has no server id, skipping {:?}", change);
            return Ok(());
        };

        match change {
            Change::MessageAppended(message) => self.backend.add_message(id, message).await,
            Change::MessageEdited { index, text } => {
                self.backend.edit_message(id, *index, text).await
            }
            Change::MessageDeleted { index } => self.backend.delete_message(id, *index).await,
            Change::Created | Change::Removed => Ok(()),
        }
    }

    fn requires_login(&self) -> bool {
        true
    }

    fn store_name(&self) -> &str {
        "remote"
    }
}
