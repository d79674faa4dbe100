use std::collections::HashSet;

use crate::model::Message;

/// Ordered message timeline for a single conversation.
///
/// Messages keep arrival/server order and are never re-sorted locally.
/// `version` changes only when the sequence is actually mutated, so
/// consumers can use it to skip redundant regrouping and repaints.
#[derive(Default, Clone, Debug)]
pub struct MessageStore {
    messages: Vec<Message>,
    version: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Overwrite the timeline only if the incoming id-set differs.
    ///
    /// Returns `true` when the store was replaced.
    pub fn replace_all(&mut self, messages: Vec<Message>) -> bool {
        if same_id_set(&self.messages, &messages) {
            return false;
        }
        self.messages = messages;
        self.version += 1;
        true
    }

    /// Overwrite the timeline regardless of its current content.
    pub fn load(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        self.version += 1;
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.version += 1;
    }

    /// Drop all messages, e.g. when the owning view closes.
    pub fn clear(&mut self) {
        if !self.messages.is_empty() {
            self.messages.clear();
            self.version += 1;
        }
    }
}

fn same_id_set(current: &[Message], incoming: &[Message]) -> bool {
    if current.len() != incoming.len() {
        return false;
    }
    let current_ids: HashSet<&str> = current.iter().map(|m| m.id.as_str()).collect();
    let incoming_ids: HashSet<&str> = incoming.iter().map(|m| m.id.as_str()).collect();
    current_ids == incoming_ids
}
