//! Process-lifetime keyed adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use roundtable_core::ConversationState;
use tokio::sync::RwLock;
use tracing::info;

use crate::adapter::StateStore;

/// Keeps every conversation in a process-lifetime map keyed by the
/// caller-chosen identifier. State survives across invocations within one
/// process and is lost when it exits.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    states: RwLock<HashMap<String, ConversationState>>,
}

impl MemoryStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifiers with live state, for host housekeeping.
    pub async fn conversation_ids(&self) -> Vec<String> {
        self.states.read().await.keys().cloned().collect()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load(&self, conversation_id: &str) -> anyhow::Result<Option<ConversationState>> {
        Ok(self.states.read().await.get(conversation_id).cloned())
    }

    async fn save(&self, conversation_id: &str, state: &ConversationState) -> anyhow::Result<()> {
        self.states
            .write()
            .await
            .insert(conversation_id.to_string(), state.clone());
        Ok(())
    }

    async fn remove(&self, conversation_id: &str) -> anyhow::Result<()> {
        self.states.write().await.remove(conversation_id);
        info!("removed conversation {conversation_id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn test_load_save_remove_cycle() {
        let store = MemoryStateStore::new();
        assert!(store.load("chat-1").await.expect("load").is_none());

        let mut state = ConversationState::new();
        state.spot_count = 2;
        store.save("chat-1", &state).await.expect("save");

        let loaded = store
            .load("chat-1")
            .await
            .expect("load")
            .expect("state exists");
        assert_eq!(loaded.spot_count, 2);
        assert_eq!(store.conversation_ids().await, vec!["chat-1".to_string()]);

        store.remove("chat-1").await.expect("remove");
        assert!(store.load("chat-1").await.expect("load").is_none());
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn test_identifiers_are_isolated() {
        let store = MemoryStateStore::new();
        let mut first = ConversationState::new();
        first.spot_count = 2;
        let mut second = ConversationState::new();
        second.spot_count = 5;

        store.save("a", &first).await.expect("save");
        store.save("b", &second).await.expect("save");

        let loaded = store.load("a").await.expect("load").expect("state exists");
        assert_eq!(loaded.spot_count, 2);
    }
}
