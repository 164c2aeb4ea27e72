//! Conversation state owned by one controller instance.
//!
//! Loaded conversations are tagged with a session-local [`ConversationKey`]
//! so in-flight replies land in the conversation they were sent from,
//! whatever happens to positions in the meantime.

use chat_types::{ChatError, Result, conversation::{Conversation, ConversationId}};
use crate::reveal::Reveal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationKey(u64);

#[derive(Debug, Clone)]
struct Entry {
    key: ConversationKey,
    conversation: Conversation,
}

/// A reply request that has not been turned into a bot message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub id: u64,
    pub conversation: ConversationKey,
    pub status: ReplyStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyStatus {
    Waiting,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct ChatState {
    entries: Vec<Entry>,
    /// Always the key of an element of `entries`
    active: Option<ConversationKey>,
    pending: Vec<PendingReply>,
    reveal: Option<Reveal>,
    next_key: u64,
    next_reply: u64,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new conversation list and make its first element active.
    /// Drops every placeholder and any running reveal.
    pub fn replace_all(&mut self, conversations: Vec<Conversation>) {
        self.entries.clear();
        self.pending.clear();
        self.reveal = None;
        for conversation in conversations {
            let key = self.allocate_key();
            self.entries.push(Entry { key, conversation });
        }
        self.active = self.entries.first().map(|e| e.key);
    }

    fn allocate_key(&mut self) -> ConversationKey {
        self.next_key += 1;
        ConversationKey(self.next_key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn conversations(&self) -> impl Iterator<Item = &Conversation> {
        self.entries.iter().map(|e| &e.conversation)
    }

    /// Owned copy of the loaded list, for handing to a store across an await
    pub fn snapshot(&self) -> Vec<Conversation> {
        self.conversations().cloned().collect()
    }

    pub fn key_at(&self, index: usize) -> Option<ConversationKey> {
        self.entries.get(index).map(|e| e.key)
    }

    pub fn index_of(&self, key: ConversationKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// Key of the loaded conversation carrying persistent id `id`
    pub fn key_for_id(&self, id: ConversationId) -> Option<ConversationKey> {
        self.entries
            .iter()
            .find(|e| e.conversation.id == Some(id))
            .map(|e| e.key)
    }

    pub fn get(&self, key: ConversationKey) -> Option<&Conversation> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.conversation)
    }

    pub fn get_mut(&mut self, key: ConversationKey) -> Option<&mut Conversation> {
        self.entries
            .iter_mut()
            .find(|e| e.key == key)
            .map(|e| &mut e.conversation)
    }

    pub fn active_key(&self) -> Option<ConversationKey> {
        self.active
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active.and_then(|key| self.get(key))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.and_then(|key| self.index_of(key))
    }

    /// Make the conversation at `index` active
    pub fn select(&mut self, index: usize) -> Result<()> {
        let key = self.key_at(index).ok_or(ChatError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })?;
        self.active = Some(key);
        Ok(())
    }

    /// Remove the conversation at `index`. Clears the active selection when
    /// it pointed there and forgets that conversation's placeholders.
    pub fn remove(&mut self, index: usize) -> Result<Conversation> {
        if index >= self.entries.len() {
            return Err(ChatError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let entry = self.entries.remove(index);
        if self.active == Some(entry.key) {
            self.active = None;
        }
        self.pending.retain(|p| p.conversation != entry.key);
        if self.reveal.as_ref().is_some_and(|r| r.conversation == entry.key) {
            self.reveal = None;
        }
        Ok(entry.conversation)
    }

    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    // ─── Placeholders ────────────────────────────────────────

    pub fn pending(&self) -> &[PendingReply] {
        &self.pending
    }

    /// Show a "typing" placeholder for `conversation`; returns its id
    pub fn begin_reply(&mut self, conversation: ConversationKey) -> u64 {
        self.next_reply += 1;
        let id = self.next_reply;
        self.pending.push(PendingReply {
            id,
            conversation,
            status: ReplyStatus::Waiting,
        });
        id
    }

    /// Take the placeholder out; `None` if it was already dropped
    pub fn resolve_reply(&mut self, id: u64) -> Option<PendingReply> {
        let pos = self.pending.iter().position(|p| p.id == id)?;
        Some(self.pending.remove(pos))
    }

    /// Leave the placeholder in place with error text
    pub fn fail_reply(&mut self, id: u64, text: impl Into<String>) {
        if let Some(p) = self.pending.iter_mut().find(|p| p.id == id) {
            p.status = ReplyStatus::Failed(text.into());
        }
    }

    /// Failed placeholders last until the conversation's messages change
    pub fn clear_failed(&mut self, conversation: ConversationKey) {
        self.pending.retain(|p| {
            p.conversation != conversation || p.status == ReplyStatus::Waiting
        });
    }

    // ─── Reveal ──────────────────────────────────────────────

    pub fn reveal(&self) -> Option<&Reveal> {
        self.reveal.as_ref()
    }

    pub fn start_reveal(&mut self, reveal: Reveal) {
        self.reveal = if reveal.is_done() { None } else { Some(reveal) };
    }

    /// Advance the running reveal. Returns true while it is still running.
    pub fn tick_reveal(&mut self, chars: usize) -> bool {
        let running = match self.reveal.as_mut() {
            Some(reveal) => reveal.advance(chars),
            None => return false,
        };
        if !running {
            self.reveal = None;
        }
        running
    }

    pub fn stop_reveal(&mut self) {
        self.reveal = None;
    }

    /// End the reveal if it targets `conversation`; message indices there
    /// are about to shift or change.
    pub fn settle_reveal(&mut self, conversation: ConversationKey) {
        if self.reveal.as_ref().is_some_and(|r| r.conversation == conversation) {
            self.reveal = None;
        }
    }
}
