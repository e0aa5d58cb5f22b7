//! Self-contained payload adapter.
//!
//! Hosts that cannot hold process state carry the conversation as a JSON
//! document attached to their own data stream: decode it into the adapter
//! on each invocation, run the engine, then re-attach
//! [`PayloadStateStore::into_payload`]'s output.

use anyhow::Context;
use async_trait::async_trait;
use roundtable_core::ConversationState;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::adapter::StateStore;

/// Adapter backed by a single JSON document mapping conversation
/// identifiers to serialized states.
#[derive(Debug, Default)]
pub struct PayloadStateStore {
    document: RwLock<Map<String, Value>>,
}

impl PayloadStateStore {
    /// Start from an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a document produced by an earlier invocation. `Null` counts
    /// as absent; anything else must be a JSON object.
    pub fn from_payload(payload: Value) -> anyhow::Result<Self> {
        let document = match payload {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => anyhow::bail!("conversation payload must be a JSON object, got {other}"),
        };
        Ok(Self {
            document: RwLock::new(document),
        })
    }

    /// The document to re-attach to the pipeline's data stream.
    pub fn into_payload(self) -> Value {
        Value::Object(self.document.into_inner())
    }
}

#[async_trait]
impl StateStore for PayloadStateStore {
    async fn load(&self, conversation_id: &str) -> anyhow::Result<Option<ConversationState>> {
        self.document
            .read()
            .await
            .get(conversation_id)
            .map(|value| {
                serde_json::from_value(value.clone())
                    .with_context(|| format!("corrupt payload for conversation {conversation_id}"))
            })
            .transpose()
    }

    async fn save(&self, conversation_id: &str, state: &ConversationState) -> anyhow::Result<()> {
        let encoded = serde_json::to_value(state)
            .with_context(|| format!("encoding state for conversation {conversation_id}"))?;
        self.document
            .write()
            .await
            .insert(conversation_id.to_string(), encoded);
        Ok(())
    }

    async fn remove(&self, conversation_id: &str) -> anyhow::Result<()> {
        self.document.write().await.remove(conversation_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn test_payload_round_trip() {
        let store = PayloadStateStore::new();
        let mut state = ConversationState::new();
        state.spot_count = 3;
        state.max_rounds = 2;
        state.apply_roles(vec![]);
        state.append("hi", 0);

        store.save("chat-1", &state).await.expect("save");
        let payload = store.into_payload();

        // a later invocation re-attaches the document
        let revived = PayloadStateStore::from_payload(payload).expect("decode");
        let loaded = revived
            .load("chat-1")
            .await
            .expect("load")
            .expect("state exists");
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn test_null_payload_is_empty() {
        let store = PayloadStateStore::from_payload(Value::Null).expect("decode");
        assert!(store.load("anything").await.expect("load").is_none());
    }

    #[test]
    fn test_non_object_payload_rejected() {
        assert!(PayloadStateStore::from_payload(json!([1, 2, 3])).is_err());
    }

    #[tokio::test]
    async fn test_corrupt_state_propagates() {
        let store = PayloadStateStore::from_payload(json!({"chat-1": {"messages": 42}}))
            .unwrap_or_default();
        assert!(store.load("chat-1").await.is_err());
    }
}
