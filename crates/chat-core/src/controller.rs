//! Conversation view controller.
//!
//! Owns the [`ChatState`] behind `Rc<RefCell<…>>` and is clone-cheap, so the
//! UI can hand a copy to every spawned task. A borrow of the state is never
//! held across an `.await`: each operation mutates synchronously, takes an
//! owned snapshot, then talks to the store or backend.
//!
//! Send lifecycle per call: Idle → Sending (placeholder) → Resolved (bot
//! message appended) | Failed (placeholder shows error text) → Idle.
//! Several sends may be in flight; each reply lands in the conversation it
//! was sent from, in completion order.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chat_types::{
    ChatError, Result,
    config::ClientConfig,
    conversation::{derive_title, Conversation, ConversationId},
    event::ChatEvent,
    message::Message,
};
use crate::event_bus::EventBus;
use crate::ports::ChatBackendPort;
use crate::reveal::Reveal;
use crate::state::{ChatState, ConversationKey};
use crate::store::{Change, ConversationStore};
use crate::view::{self, ChatView, FAILED_REPLY_TEXT};

/// Shared login flag. The host page seeds it; account actions flip it.
#[derive(Clone, Default)]
pub struct Session {
    logged_in: Rc<Cell<bool>>,
}

impl Session {
    pub fn new(logged_in: bool) -> Self {
        Self {
            logged_in: Rc::new(Cell::new(logged_in)),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in.get()
    }

    pub fn set_logged_in(&self, value: bool) {
        self.logged_in.set(value);
    }
}

/// What happened to a `send_message` call that did not error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Empty or whitespace-only input; nothing appended, nothing sent
    Ignored,
    /// Bot reply appended
    Replied,
    /// The conversation left the loaded list while the reply was in flight.
    /// The reply is still persisted when the conversation has an id.
    Orphaned,
}

/// Where a reply belongs: the entry it was sent from, or failing that the
/// reloaded entry with the same persistent id
#[derive(Debug, Clone, Copy)]
struct ReplyTarget {
    key: ConversationKey,
    id: Option<ConversationId>,
}

#[derive(Clone)]
pub struct ConversationController {
    state: Rc<RefCell<ChatState>>,
    store: Rc<dyn ConversationStore>,
    backend: Rc<dyn ChatBackendPort>,
    session: Session,
    config: ClientConfig,
    event_bus: EventBus,
}

impl ConversationController {
    pub fn new(
        config: ClientConfig,
        store: Rc<dyn ConversationStore>,
        backend: Rc<dyn ChatBackendPort>,
        session: Session,
        event_bus: EventBus,
    ) -> Self {
        log::info!("Conversation controller using {} store", store.store_name());
        Self {
            state: Rc::new(RefCell::new(ChatState::new())),
            store,
            backend,
            session,
            config,
            event_bus,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> Vec<Conversation> {
        self.state.borrow().snapshot()
    }

    pub fn active(&self) -> Option<Conversation> {
        self.state.borrow().active().cloned()
    }

    /// Render the current state; `filter` narrows the sidebar only
    pub fn view(&self, filter: &str) -> ChatView {
        view::render(&self.state.borrow(), filter)
    }

    fn login_missing(&self) -> bool {
        self.store.requires_login() && !self.session.is_logged_in()
    }

    // ─── Load / create ───────────────────────────────────────

    /// Fetch persisted conversations and make the first one active.
    /// Does nothing for a server-backed store without a session.
    pub async fn load(&self) -> Result<()> {
        if self.login_missing() {
            log::debug!("Not logged in, skipping conversation load");
            return Ok(());
        }

        let conversations = self.store.load().await?;
        let count = conversations.len();
        self.state.borrow_mut().replace_all(conversations);
        log::info!("Loaded {} conversation(s)", count);
        self.event_bus.emit(ChatEvent::ConversationsLoaded { count });
        Ok(())
    }

    /// Start a new conversation. It replaces the loaded list and becomes active.
    pub async fn create_conversation(&self) -> Result<()> {
        if self.login_missing() {
            self.event_bus.notice(ChatError::NotLoggedIn.to_string());
            return Err(ChatError::NotLoggedIn);
        }

        let conversation = match self.store.create().await {
            Ok(c) => c,
            Err(e) => {
                self.event_bus.notice(e.to_string());
                return Err(e);
            }
        };

        let all = {
            let mut state = self.state.borrow_mut();
            state.replace_all(vec![conversation.clone()]);
            state.snapshot()
        };
        self.event_bus.emit(ChatEvent::ConversationCreated);
        self.persist(&all, &conversation, Change::Created).await
    }

    // ─── Send ────────────────────────────────────────────────

    /// Append a user message, ask the backend for a reply, append the reply.
    ///
    /// A failed reply request leaves an error placeholder and returns the
    /// error; no bot message is appended and nothing is retried.
    pub async fn send_message(&self, text: &str) -> Result<SendOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(SendOutcome::Ignored);
        }

        let (target, user_msg, all, conversation) = {
            let mut state = self.state.borrow_mut();
            let Some(key) = state.active_key() else {
                drop(state);
                self.event_bus.notice("Start a new chat first");
                return Err(ChatError::NoActiveConversation);
            };
            state.clear_failed(key);
            state.settle_reveal(key);

            let user_msg = Message::user(text);
            let conv = state
                .get_mut(key)
                .ok_or(ChatError::NoActiveConversation)?;
            if conv.has_default_title() {
                conv.title = derive_title(text, self.config.title_max_chars);
            }
            conv.messages.push(user_msg.clone());
            let conversation = conv.clone();
            let target = ReplyTarget {
                key,
                id: conversation.id,
            };
            (target, user_msg, state.snapshot(), conversation)
        };

        // Failure is logged and emitted by `persist`; the reply is still requested
        let _ = self
            .persist(&all, &conversation, Change::MessageAppended(user_msg))
            .await;

        let reply_id = self.state.borrow_mut().begin_reply(target.key);
        self.event_bus.emit(ChatEvent::ReplyPending { reply_id });

        match self.backend.ask(text).await {
            Ok(reply) => self.finish_reply(target, reply_id, reply).await,
            Err(e) => {
                log::warn!("Reply {} failed: {}", reply_id, e);
                self.state.borrow_mut().fail_reply(reply_id, FAILED_REPLY_TEXT);
                self.event_bus.emit(ChatEvent::ReplyFailed {
                    reply_id,
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn finish_reply(
        &self,
        target: ReplyTarget,
        reply_id: u64,
        reply: String,
    ) -> Result<SendOutcome> {
        let bot_msg = Message::bot(reply);
        let (outcome, all, conversation) = {
            let mut state = self.state.borrow_mut();
            state.resolve_reply(reply_id);

            let key = if state.get(target.key).is_some() {
                Some(target.key)
            } else {
                target.id.and_then(|id| state.key_for_id(id))
            };
            let attached = key.and_then(|key| {
                let conv = state.get_mut(key)?;
                conv.messages.push(bot_msg.clone());
                Some((key, conv.messages.len() - 1, conv.clone()))
            });

            match attached {
                Some((key, index, conversation)) => {
                    if self.config.typing.enabled {
                        state.start_reveal(Reveal::new(key, index, &bot_msg.text));
                    }
                    (SendOutcome::Replied, state.snapshot(), Some(conversation))
                }
                None => {
                    // Off the loaded list; the store can still file it by id
                    let detached = target.id.map(|id| {
                        let mut conversation = Conversation::new(Some(id));
                        conversation.messages.push(bot_msg.clone());
                        conversation
                    });
                    (SendOutcome::Orphaned, state.snapshot(), detached)
                }
            }
        };

        self.event_bus.emit(ChatEvent::ReplyReceived { reply_id });

        let Some(conversation) = conversation else {
            log::debug!("Reply {} arrived for an unsaved, deleted conversation", reply_id);
            return Ok(outcome);
        };
        // Failure is logged and emitted by `persist`; the reply stays shown
        let _ = self
            .persist(&all, &conversation, Change::MessageAppended(bot_msg))
            .await;
        Ok(outcome)
    }

    // ─── Message edits ───────────────────────────────────────

    /// Replace the text of the active conversation's message at `index`.
    /// Blank replacement text is ignored.
    pub async fn edit_message(&self, index: usize, new_text: &str) -> Result<()> {
        if new_text.trim().is_empty() {
            return Ok(());
        }

        let (all, conversation) = self.mutate_active(|conv| {
            let len = conv.messages.len();
            let msg = conv
                .messages
                .get_mut(index)
                .ok_or(ChatError::IndexOutOfRange { index, len })?;
            msg.text = new_text.to_string();
            Ok(())
        })?;

        let change = Change::MessageEdited {
            index,
            text: new_text.to_string(),
        };
        self.persist(&all, &conversation, change).await
    }

    /// Remove the active conversation's message at `index`; later messages
    /// shift down by one.
    pub async fn delete_message(&self, index: usize) -> Result<()> {
        let (all, conversation) = self.mutate_active(|conv| {
            let len = conv.messages.len();
            if index >= len {
                return Err(ChatError::IndexOutOfRange { index, len });
            }
            conv.messages.remove(index);
            Ok(())
        })?;

        self.persist(&all, &conversation, Change::MessageDeleted { index })
            .await
    }

    fn mutate_active(
        &self,
        f: impl FnOnce(&mut Conversation) -> Result<()>,
    ) -> Result<(Vec<Conversation>, Conversation)> {
        let mut state = self.state.borrow_mut();
        let key = state.active_key().ok_or(ChatError::NoActiveConversation)?;
        let conv = state.get_mut(key).ok_or(ChatError::NoActiveConversation)?;
        f(conv)?;
        let conversation = conv.clone();
        state.clear_failed(key);
        state.settle_reveal(key);
        Ok((state.snapshot(), conversation))
    }

    // ─── Sidebar ─────────────────────────────────────────────

    pub fn select_conversation(&self, index: usize) -> Result<()> {
        self.state.borrow_mut().select(index)
    }

    /// Remove the conversation at `index`; clears the selection if it was active
    pub async fn delete_conversation(&self, index: usize) -> Result<()> {
        let (removed, all) = {
            let mut state = self.state.borrow_mut();
            let removed = state.remove(index)?;
            (removed, state.snapshot())
        };
        self.persist(&all, &removed, Change::Removed).await
    }

    /// Forget everything loaded, e.g. after logout
    pub fn clear(&self) {
        self.state.borrow_mut().clear();
    }

    // ─── Reveal ──────────────────────────────────────────────

    /// Advance the reply reveal one tick. Returns true while still running.
    pub fn tick_reveal(&self) -> bool {
        let chars = self.config.typing.chars_per_tick.max(1);
        self.state.borrow_mut().tick_reveal(chars)
    }

    /// Show the rest of the reply now. The request itself is unaffected.
    pub fn stop_reveal(&self) {
        self.state.borrow_mut().stop_reveal();
    }

    pub fn is_revealing(&self) -> bool {
        self.state.borrow().reveal().is_some()
    }

    // ─── Persistence ─────────────────────────────────────────

    async fn persist(
        &self,
        all: &[Conversation],
        conversation: &Conversation,
        change: Change,
    ) -> Result<()> {
        self.store
            .persist(all, conversation, &change)
            .await
            .map_err(|e| {
                log::warn!("Failed to persist {:?}: {}", change, e);
                self.event_bus.emit(ChatEvent::Error {
                    message: e.to_string(),
                });
                e
            })
    }
}
