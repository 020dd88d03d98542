//! Bounded conversation buffers.
//!
//! `ChatHistory` holds at most `capacity` messages, evicting the oldest
//! entry before appending when full. `FixedFirstChatHistory` instead evicts
//! the second entry, pinning the first message (the system prompt) across
//! arbitrarily long conversations.

use crate::types::{ChatMessage, Role};

/// An ordered message buffer with a maximum length.
///
/// `capacity = None` disables eviction entirely.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
    capacity: Option<usize>,
}

impl ChatHistory {
    /// Create an empty, unbounded history.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Create an empty history bounded at `capacity` messages.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            messages: Vec::new(),
            capacity: Some(capacity),
        }
    }

    /// Seed a history with initial messages.
    pub fn with_messages(messages: Vec<ChatMessage>, capacity: Option<usize>) -> Self {
        Self { messages, capacity }
    }

    /// Append a message, evicting the oldest entry first if full.
    pub fn push(&mut self, msg: ChatMessage) {
        if let Some(cap) = self.capacity {
            if self.messages.len() >= cap && !self.messages.is_empty() {
                self.messages.remove(0);
            }
        }
        self.messages.push(msg);
    }

    /// Append role-tagged text.
    pub fn push_text(&mut self, role: Role, text: impl Into<String>) {
        self.push(ChatMessage::new(role, text));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Clone the buffer contents for a completion request.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

/// A bounded history whose first message is never evicted.
///
/// Overflow removes index 1 instead of index 0, so a role-defining system
/// prompt survives no matter how long the conversation runs.
#[derive(Debug, Clone, Default)]
pub struct FixedFirstChatHistory {
    messages: Vec<ChatMessage>,
    capacity: Option<usize>,
}

impl FixedFirstChatHistory {
    pub fn bounded(capacity: usize) -> Self {
        Self {
            messages: Vec::new(),
            capacity: Some(capacity),
        }
    }

    pub fn with_messages(messages: Vec<ChatMessage>, capacity: Option<usize>) -> Self {
        Self { messages, capacity }
    }

    /// Append a message. When full, the entry at index 1 is evicted so the
    /// first message stays pinned.
    pub fn push(&mut self, msg: ChatMessage) {
        if let Some(cap) = self.capacity {
            if self.messages.len() >= cap && self.messages.len() > 1 {
                self.messages.remove(1);
            }
        }
        self.messages.push(msg);
    }

    pub fn push_text(&mut self, role: Role, text: impl Into<String>) {
        self.push(ChatMessage::new(role, text));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn to_messages(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
