//! The persistence-adapter contract.

use async_trait::async_trait;
use roundtable_core::ConversationState;

/// Persists one [`ConversationState`] per caller-chosen identifier.
///
/// Implementations may back this with a process-lifetime keyed store, a
/// self-contained payload the caller re-attaches per invocation, or any
/// external database. The engine is agnostic; adapter failures propagate
/// unchanged to the caller.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the state for an identifier, `None` when nothing was saved yet.
    async fn load(&self, conversation_id: &str) -> anyhow::Result<Option<ConversationState>>;

    /// Persist the state for an identifier, replacing any previous value.
    async fn save(&self, conversation_id: &str, state: &ConversationState) -> anyhow::Result<()>;

    /// Drop an identifier entirely. Unlike the engine's `reset`, nothing
    /// survives, not even the role registry.
    async fn remove(&self, conversation_id: &str) -> anyhow::Result<()>;
}
