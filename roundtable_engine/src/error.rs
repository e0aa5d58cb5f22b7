//! Engine error taxonomy.
//!
//! Only genuine failures live here. A conversation at its round cap and an
//! export against an empty conversation are ordinary statuses carried in
//! the operation results, not errors.

use roundtable_core::ExtractError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Slot index outside the configured range; surfaced before any
    /// mutation.
    #[error("slot index {slot_index} outside configured range 0..{spot_count}")]
    InvalidSlot {
        slot_index: usize,
        spot_count: usize,
    },

    /// An input item carried no usable text. Aborts the whole batch so the
    /// store never holds an empty message.
    #[error("input item {index} unusable: {source}")]
    NoContent {
        index: usize,
        #[source]
        source: ExtractError,
    },

    /// A persistence collaborator failed; propagated with its context.
    #[error("persistence adapter failure: {0}")]
    Adapter(#[from] anyhow::Error),
}
