//! Browser-local store: the whole conversation list is one JSON document
//! under a fixed key, rewritten on every change.

use std::rc::Rc;
use async_trait::async_trait;
use chat_types::{
    Result,
    conversation::{Conversation, ConversationId},
};
use crate::ports::StoragePort;
use super::{Change, ConversationStore};

pub const CONVERSATIONS_KEY: &str = "conversations";

pub struct LocalStore {
    storage: Rc<dyn StoragePort>,
}

impl LocalStore {
    pub fn new(storage: Rc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    async fn write_all(&self, all: &[Conversation]) -> Result<()> {
        let json = serde_json::to_vec(all)?;
        self.storage.set(CONVERSATIONS_KEY, &json).await
    }
}

#[async_trait(?Send)]
impl ConversationStore for LocalStore {
    async fn load(&self) -> Result<Vec<Conversation>> {
        match self.storage.get(CONVERSATIONS_KEY).await? {
            Some(data) => Ok(serde_json::from_slice(&data)?),
            None => Ok(Vec::new()),
        }
    }

    async fn create(&self) -> Result<Conversation> {
        Ok(Conversation::new(Some(ConversationId::from_timestamp())))
    }

    async fn persist(
        &self,
        all: &[Conversation],
        _conversation: &Conversation,
        _change: &Change,
    ) -> Result<()> {
        self.write_all(all).await
    }

    fn requires_login(&self) -> bool {
        false
    }

    fn store_name(&self) -> &str {
        "local"
    }
}
