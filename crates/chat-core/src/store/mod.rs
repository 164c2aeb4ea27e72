//! Persistence strategies for conversations.
//!
//! The controller never talks to the server or to local storage directly;
//! it hands every mutation to a [`ConversationStore`], picked once from
//! [`PersistenceMode`].

pub mod remote;
pub mod local;

use std::rc::Rc;
use async_trait::async_trait;
use chat_types::{
    Result,
    config::PersistenceMode,
    conversation::Conversation,
    message::Message,
};
use crate::ports::{ChatBackendPort, StoragePort};

pub use remote::RemoteStore;
pub use local::LocalStore;

/// A mutation the store may need to mirror
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Created,
    MessageAppended(Message),
    MessageEdited { index: usize, text: String },
    MessageDeleted { index: usize },
    Removed,
}

#[async_trait(?Send)]
pub trait ConversationStore {
    /// Everything persisted so far, in display order
    async fn load(&self) -> Result<Vec<Conversation>>;

    /// A fresh, empty conversation carrying its persistent id
    async fn create(&self) -> Result<Conversation>;

    /// Mirror `change` applied to `conversation`.
    /// `all` is the loaded list after the change.
    async fn persist(
        &self,
        all: &[Conversation],
        conversation: &Conversation,
        change: &Change,
    ) -> Result<()>;

    /// Whether load/create only make sense with a logged-in session
    fn requires_login(&self) -> bool;

    /// Name of this strategy (for logging/debug)
    fn store_name(&self) -> &str;
}

/// Build the store for the configured mode
pub fn store_for_mode(
    mode: PersistenceMode,
    backend: Rc<dyn ChatBackendPort>,
    storage: Rc<dyn StoragePort>,
) -> Rc<dyn ConversationStore> {
    match mode {
        PersistenceMode::Remote => Rc::new(RemoteStore::new(backend)),
        PersistenceMode::Local => Rc::new(LocalStore::new(storage)),
    }
}
