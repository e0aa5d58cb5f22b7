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

//! Renders an accumulated conversation into the wire shapes the different
//! LLM platforms consume, plus two platform-neutral export shapes.
//!
//! One shared role-canonicalization table drives every platform; each
//! platform is a variant of [`Platform`] selecting a small renderer, so the
//! mapping rules stay provably consistent.

mod platform;
mod shapes;

pub use platform::{
    Platform, RenderOptions, RenderedConversation, SimpleMessage, SystemPromptPosition,
    conversation_history,
};
pub use shapes::{ArrayExport, GroupedExport, flat_array, grouped_by_role};
