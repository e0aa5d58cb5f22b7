//! The append-only message log.
//!
//! Messages are immutable once appended; the store supports append, full
//! read, tail, and full clear only. No update, no delete-by-id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Role name resolved from the slot index at record time.
    ///
    /// Captured as a plain string, not a registry back-reference, so later
    /// registry edits do not retroactively change historical messages.
    pub role: String,
    /// Extracted text payload, never empty
    pub content: String,
    /// Zero-based participant slot that produced this message
    pub spot_index: usize,
    /// Assigned by the store at append time, non-decreasing
    pub timestamp: DateTime<Utc>,
}

/// Append-only sequence of messages in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Append one message, assigning its timestamp.
    ///
    /// Timestamps are clamped to the previous message's instant so the
    /// sequence stays non-decreasing under clock adjustment. Content
    /// validation is the engine's responsibility before this call.
    pub fn append(
        &mut self,
        role: impl Into<String>,
        content: impl Into<String>,
        spot_index: usize,
    ) -> &Message {
        let mut timestamp = Utc::now();
        if let Some(last) = self.messages.last() {
            timestamp = timestamp.max(last.timestamp);
        }
        self.messages.push(Message {
            role: role.into(),
            content: content.into(),
            spot_index,
            timestamp,
        });
        // push above guarantees non-empty
        &self.messages[self.messages.len() - 1]
    }

    /// Full ordered sequence, non-destructive.
    #[must_use]
    pub fn read_all(&self) -> &[Message] {
        &self.messages
    }

    /// Last `n` messages; `n == 0` means no limit.
    #[must_use]
    pub fn tail(&self, n: usize) -> &[Message] {
        if n == 0 {
            return &self.messages;
        }
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    /// Empty the sequence. The role registry and slot count live elsewhere
    /// and are untouched.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut store = MessageStore::new();
        store.append("User", "first", 0);
        store.append("Assistant", "second", 1);
        store.append("User", "third", 0);

        let contents: Vec<&str> = store
            .read_all()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let mut store = MessageStore::new();
        for i in 0..5 {
            store.append("User", format!("msg {i}"), 0);
        }

        let messages = store.read_all();
        for pair in messages.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn test_tail_zero_means_no_limit() {
        let mut store = MessageStore::new();
        for i in 0..4 {
            store.append("User", format!("msg {i}"), 0);
        }

        assert_eq!(store.tail(0).len(), 4);
        assert_eq!(store.tail(2).len(), 2);
        assert_eq!(store.tail(2)[0].content, "msg 2");
        assert_eq!(store.tail(100).len(), 4);
    }

    #[test]
    fn test_clear_empties_sequence() {
        let mut store = MessageStore::new();
        store.append("User", "hi", 0);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.read_all().len(), 0);
    }

    #[test]
    fn test_message_serde_camel_case() {
        let mut store = MessageStore::new();
        store.append("User", "hi", 0);

        let json = serde_json::to_value(store.read_all()).unwrap_or_default();
        assert!(json[0].get("spotIndex").is_some());
        assert_eq!(json[0]["role"], "User");
    }
}
