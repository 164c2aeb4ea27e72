//! Event bus between the conversation controller and the UI.
//!
//! Single-threaded (WASM). The controller pushes from inside async tasks,
//! the UI drains once per frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use chat_types::event::ChatEvent;

#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: ChatEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Shorthand for a blocking notice the user has to dismiss
    pub fn notice(&self, message: impl Into<String>) {
        self.emit(ChatEvent::Notice {
            message: message.into(),
        });
    }

    pub fn drain(&self) -> Vec<ChatEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }
}
