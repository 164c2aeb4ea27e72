//! Character-by-character reveal of a freshly received bot reply.
//!
//! Purely cosmetic: the full reply is already stored in the conversation,
//! the reveal only limits how much of it the view shows.

use crate::state::ConversationKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub conversation: ConversationKey,
    pub message_index: usize,
    shown: usize,
    total: usize,
}

impl Reveal {
    pub fn new(conversation: ConversationKey, message_index: usize, text: &str) -> Self {
        Self {
            conversation,
            message_index,
            shown: 0,
            total: text.chars().count(),
        }
    }

    /// Reveal `chars` more characters. Returns true while text remains hidden.
    pub fn advance(&mut self, chars: usize) -> bool {
        self.shown = (self.shown + chars).min(self.total);
        !self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.total
    }

    pub fn shown(&self) -> usize {
        self.shown
    }

    /// The visible prefix of `text`
    pub fn visible<'a>(&self, text: &'a str) -> &'a str {
        match text.char_indices().nth(self.shown) {
            Some((byte, _)) => &text[..byte],
            None => text,
        }
    }
}
