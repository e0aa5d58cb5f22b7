#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! The conversation engine: `record`, `export`, `reset` over a pluggable
//! persistence adapter.
//!
//! Each conversation identifier owns one [`ConversationState`]; the engine
//! loads it through the injected [`StateStore`], applies one operation to
//! completion, and persists the result. There is no cross-invocation
//! locking: callers racing two invocations on one identifier get
//! last-writer-wins, so hosts needing strict ordering must serialize calls
//! per identifier.
//!
//! [`ConversationState`]: roundtable_core::ConversationState

mod adapter;
mod engine;
mod error;
mod memory;
mod payload;

pub use adapter::StateStore;
pub use engine::{
    ConversationEngine, ExportFormat, ExportOutcome, ExportPayload, ExportRequest, RecordOutcome,
    RecordRequest, RoundSummary,
};
pub use error::EngineError;
pub use memory::MemoryStateStore;
pub use payload::PayloadStateStore;
