use super::types::Message;
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe, append-only conversation store.
///
/// Cloning is cheap; clones share the same underlying sequence. The UI reads
/// a snapshot each frame while worker events append through the same handle.
#[derive(Debug, Clone)]
pub struct MessageStore {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Append a message, preserving send order
    pub fn push(&self, message: Message) {
        self.messages.write().push(message);
    }

    /// Snapshot of the full conversation in order
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    /// The most recently appended message, if any
    pub fn last(&self) -> Option<Message> {
        self.messages.read().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{Message, Origin};

    #[test]
    fn test_push_preserves_order() {
        let store = MessageStore::new();
        store.push(Message::user("first"));
        store.push(Message::assistant("second", None));
        store.push(Message::user("third"));

        let all = store.snapshot();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].text, "first");
        assert_eq!(all[1].text, "second");
        assert_eq!(all[2].text, "third");
        assert_eq!(all[1].origin, Origin::Assistant);
    }

    #[test]
    fn test_clones_share_sequence() {
        let store = MessageStore::new();
        let handle = store.clone();
        handle.push(Message::user("hello"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.last().unwrap().text, "hello");
    }
}
