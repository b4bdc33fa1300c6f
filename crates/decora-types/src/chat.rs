//! Chat message and conversation-key types.
//!
//! These model the two-party message log exposed via `/chat/send` and
//! `/chat/history`: immutable messages appended under an order-independent
//! conversation key.

use serde::{Deserialize, Serialize};

use std::fmt;

/// A single message exchanged between two chat participants.
///
/// Messages are immutable once stored: sends append, nothing mutates or
/// deletes them for the lifetime of the process. Repeated sends of the same
/// payload create duplicate entries; dedup is deliberately not applied.
/// `timestamp` is unix epoch milliseconds, supplied by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub receiver: String,
    pub text: String,
    pub timestamp: i64,
}

/// Order-independent identifier for a two-party conversation.
///
/// Normalized by sorting the two participant names lexicographically, so
/// `(A, B)` and `(B, A)` resolve to the same key. Storage and lookup must
/// both go through [`ConversationKey::new`] -- the constructor is the only
/// place the normalization lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey(String, String);

impl ConversationKey {
    /// Build a key from two participant names, in either order.
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }

    /// The two participants in normalized (sorted) order.
    pub fn participants(&self) -> (&str, &str) {
        (&self.0, &self.1)
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}
