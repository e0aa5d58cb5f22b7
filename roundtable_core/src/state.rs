//! The per-conversation aggregate that persistence adapters serialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::{Message, MessageStore};
use crate::role::{Role, RoleRegistry};
use crate::rounds;

/// Complete state of one conversation, keyed externally by a caller-chosen
/// identifier. Serializes to a single JSON-compatible record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    pub messages: MessageStore,
    pub roles: RoleRegistry,
    /// Number of participant slots in one round
    pub spot_count: usize,
    /// Round cap, 0 = unlimited
    pub max_rounds: usize,
    /// Completed rounds, recomputed after every batch
    pub round_count: usize,
    pub last_updated: DateTime<Utc>,
}

impl ConversationState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: MessageStore::new(),
            roles: RoleRegistry::default(),
            spot_count: 0,
            max_rounds: 0,
            round_count: 0,
            last_updated: Utc::now(),
        }
    }

    /// Install or replace the role registry per the resolution rules:
    /// a non-empty set wins, an empty set is a no-op once a registry
    /// exists, and the built-in defaults fill an empty conversation.
    pub fn apply_roles(&mut self, provided: Vec<Role>) {
        let prior = (!self.roles.is_empty()).then(|| self.roles.clone());
        self.roles = RoleRegistry::resolve(provided, prior);
    }

    /// Append one message to the log, stamping the last-updated instant.
    pub fn append(&mut self, content: impl Into<String>, spot_index: usize) -> Message {
        let role = self.roles.name_for_slot(spot_index);
        let message = self.messages.append(role, content, spot_index).clone();
        self.last_updated = message.timestamp;
        message
    }

    /// Recompute the completed-round count from the log.
    pub fn recalculate_rounds(&mut self) {
        self.round_count = rounds::rounds_completed(self.messages.read_all(), self.spot_count);
    }

    #[must_use]
    pub fn limit_reached(&self) -> bool {
        rounds::limit_reached(self.messages.read_all(), self.spot_count, self.max_rounds)
    }

    #[must_use]
    pub fn rounds_remaining(&self) -> Option<usize> {
        rounds::rounds_remaining(self.round_count, self.max_rounds)
    }

    /// Drop all messages. Registry, slot count and round cap survive.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.round_count = 0;
        self.last_updated = Utc::now();
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
