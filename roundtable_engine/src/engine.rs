//! Orchestration of the accumulator: `record`, `export`, `reset`.

use roundtable_core::{Message, Role, extract_content, rounds};
use roundtable_format::{
    ArrayExport, GroupedExport, Platform, RenderOptions, RenderedConversation,
    SystemPromptPosition, conversation_history, flat_array, grouped_by_role,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::adapter::StateStore;
use crate::error::EngineError;

/// One accumulation step: a batch of input records appended to one slot.
#[derive(Debug, Clone)]
pub struct RecordRequest {
    pub conversation_id: String,
    /// Number of participant slots in one round
    pub spot_count: usize,
    /// Slot this batch belongs to, `0..spot_count`
    pub slot_index: usize,
    /// Round cap, 0 = unlimited
    pub max_rounds: usize,
    /// Role set; empty keeps the current registry (or installs defaults)
    pub roles: Vec<Role>,
    /// Input records, appended in order
    pub items: Vec<Value>,
    /// Field selector for content extraction
    pub content_field: String,
}

impl RecordRequest {
    #[must_use]
    pub fn new(conversation_id: impl Into<String>, spot_count: usize, slot_index: usize) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            spot_count,
            slot_index,
            max_rounds: 0,
            roles: Vec::new(),
            items: Vec::new(),
            content_field: "message".to_string(),
        }
    }

    #[must_use]
    pub const fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    #[must_use]
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub fn with_content_field(mut self, field: impl Into<String>) -> Self {
        self.content_field = field.into();
        self
    }

    /// Append a raw input record to the batch.
    #[must_use]
    pub fn with_item(mut self, item: Value) -> Self {
        self.items.push(item);
        self
    }

    /// Append a plain-text item, wrapped as a record under the content
    /// field.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let mut record = serde_json::Map::new();
        record.insert(self.content_field.clone(), Value::String(text.into()));
        self.items.push(Value::Object(record));
        self
    }
}

/// Result of a `record` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
#[serde(rename_all_fields = "camelCase")]
pub enum RecordOutcome {
    /// The whole batch was appended.
    Stored {
        stored: Vec<Message>,
        round_count: usize,
        rounds_remaining: Option<usize>,
    },
    /// The conversation already reached its cap; nothing was appended.
    LimitReached {
        round_count: usize,
        max_rounds: usize,
    },
}

/// Which export shape to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportFormat {
    #[default]
    Array,
    Grouped,
    ConversationHistory,
}

/// Parameters of an `export` call.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub conversation_id: String,
    pub format: ExportFormat,
    pub platform: Platform,
    /// Reduce to `{role, content}` pairs / content lists
    pub simplify: bool,
    /// Only the last `n` messages, 0 = all
    pub max_messages: usize,
    pub include_system_prompt: bool,
    pub system_prompt_position: SystemPromptPosition,
}

impl ExportRequest {
    #[must_use]
    pub fn new(conversation_id: impl Into<String>, format: ExportFormat) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            format,
            platform: Platform::default(),
            simplify: false,
            max_messages: 0,
            include_system_prompt: true,
            system_prompt_position: SystemPromptPosition::Start,
        }
    }

    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub const fn simplified(mut self) -> Self {
        self.simplify = true;
        self
    }

    #[must_use]
    pub const fn with_max_messages(mut self, max_messages: usize) -> Self {
        self.max_messages = max_messages;
        self
    }

    #[must_use]
    pub const fn with_system_prompt(
        mut self,
        include: bool,
        position: SystemPromptPosition,
    ) -> Self {
        self.include_system_prompt = include;
        self.system_prompt_position = position;
        self
    }
}

/// Round metadata attached to every rendered export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub round_count: usize,
    pub max_rounds: usize,
    /// `None` (serialized as null) when the conversation is unlimited
    pub rounds_remaining: Option<usize>,
}

/// The shape-specific part of a rendered export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportPayload {
    Array(ArrayExport),
    Grouped(GroupedExport),
    History(RenderedConversation),
}

/// Result of an `export` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExportOutcome {
    /// The conversation has no messages yet.
    NoData,
    Rendered {
        data: ExportPayload,
        rounds: RoundSummary,
    },
}

/// Composes the registry, store, round calculator and formatter into the
/// three operations callers invoke. Generic over the injected persistence
/// adapter.
pub struct ConversationEngine<S> {
    store: S,
}

impl<S: StateStore> ConversationEngine<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying adapter.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Take the adapter back, e.g. to recover a payload document at the
    /// end of an invocation.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Record a batch of input records against one slot.
    ///
    /// The whole batch is validated up front: a bad slot index or an item
    /// without usable content rejects the call before any mutation. The
    /// round limit is checked once before appending, so an accepted batch
    /// may cross the cap in a single call, but a conversation already at
    /// its cap rejects the batch as a whole.
    pub async fn record(&self, request: RecordRequest) -> Result<RecordOutcome, EngineError> {
        if request.slot_index >= request.spot_count {
            return Err(EngineError::InvalidSlot {
                slot_index: request.slot_index,
                spot_count: request.spot_count,
            });
        }

        let mut contents = Vec::with_capacity(request.items.len());
        for (index, item) in request.items.iter().enumerate() {
            let text = extract_content(item, &request.content_field)
                .map_err(|source| EngineError::NoContent { index, source })?;
            contents.push(text);
        }

        let mut state = self
            .store
            .load(&request.conversation_id)
            .await?
            .unwrap_or_default();

        state.apply_roles(request.roles);
        state.spot_count = request.spot_count;
        state.max_rounds = request.max_rounds;
        state.recalculate_rounds();

        if state.limit_reached() {
            info!(
                "conversation {} already at round limit {}, rejecting batch",
                request.conversation_id, state.max_rounds
            );
            return Ok(RecordOutcome::LimitReached {
                round_count: state.round_count,
                max_rounds: state.max_rounds,
            });
        }

        let stored: Vec<Message> = contents
            .into_iter()
            .map(|content| state.append(content, request.slot_index))
            .collect();
        state.recalculate_rounds();

        self.store.save(&request.conversation_id, &state).await?;
        info!(
            "recorded {} message(s) to slot {} of conversation {} (round {})",
            stored.len(),
            request.slot_index,
            request.conversation_id,
            state.round_count
        );

        Ok(RecordOutcome::Stored {
            stored,
            round_count: state.round_count,
            rounds_remaining: state.rounds_remaining(),
        })
    }

    /// Render the accumulated conversation. Pure read, never mutates.
    pub async fn export(&self, request: ExportRequest) -> Result<ExportOutcome, EngineError> {
        let Some(state) = self.store.load(&request.conversation_id).await? else {
            return Ok(ExportOutcome::NoData);
        };
        if state.is_empty() {
            return Ok(ExportOutcome::NoData);
        }

        let messages = state.messages.tail(request.max_messages);
        debug!(
            "exporting {} message(s) of conversation {} as {:?}",
            messages.len(),
            request.conversation_id,
            request.format
        );

        let data = match request.format {
            ExportFormat::Array => {
                ExportPayload::Array(flat_array(messages, &state.roles, request.simplify))
            }
            ExportFormat::Grouped => {
                ExportPayload::Grouped(grouped_by_role(messages, &state.roles, request.simplify))
            }
            ExportFormat::ConversationHistory => {
                let options = RenderOptions {
                    include_system_prompt: request.include_system_prompt,
                    system_prompt_position: request.system_prompt_position,
                };
                ExportPayload::History(conversation_history(
                    messages,
                    &state.roles,
                    request.platform,
                    &options,
                ))
            }
        };

        let round_count = rounds::rounds_completed(state.messages.read_all(), state.spot_count);
        Ok(ExportOutcome::Rendered {
            data,
            rounds: RoundSummary {
                round_count,
                max_rounds: state.max_rounds,
                rounds_remaining: rounds::rounds_remaining(round_count, state.max_rounds),
            },
        })
    }

    /// Clear the message log. Role registry, slot count and round cap
    /// survive; the conversation returns to its empty state.
    pub async fn reset(&self, conversation_id: &str) -> Result<(), EngineError> {
        let mut state = self.store.load(conversation_id).await?.unwrap_or_default();
        state.clear_messages();
        self.store.save(conversation_id, &state).await?;
        info!("reset conversation {conversation_id}");
        Ok(())
    }
}
