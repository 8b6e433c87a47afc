//! Conversation entities and storage
//!
//! Messages are append-only: the store grows as the conversation proceeds
//! and entries are never mutated or removed.

mod storage;
mod types;

pub use storage::MessageStore;
pub use types::{Message, Origin};

/// Fixed text shown as the assistant reply when an exchange fails.
pub const FALLBACK_ERROR_TEXT: &str = "Something went wrong. Please try again.";
