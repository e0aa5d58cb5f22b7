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

//! Core data model for turn-taking conversation accumulation.
//!
//! A conversation is a fixed, ordered set of participant slots that take
//! turns producing messages. This crate holds the pieces with real
//! invariants:
//! - the append-only [`MessageStore`] keyed by participant slot
//! - the [`RoleRegistry`] with defaulting and graceful slot lookup
//! - the round arithmetic in [`rounds`]
//! - the [`ConversationState`] aggregate that persistence adapters
//!   serialize between invocations

pub mod extract;
pub mod message;
pub mod role;
pub mod rounds;
pub mod state;

pub use extract::{ExtractError, extract_content};
pub use message::{Message, MessageStore};
pub use role::{DEFAULT_SYSTEM_PROMPT, Role, RoleRegistry};
pub use state::ConversationState;
