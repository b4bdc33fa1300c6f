//! Chat log service over a `ChatStore`.
//!
//! The service owns the one rule the store must never see violated: both
//! sides of a conversation resolve to the same normalized key, so
//! `send_message("alice", "bob", ..)` and `send_message("bob", "alice", ..)`
//! land in the same history.

use tracing::debug;

use decora_types::chat::{ChatMessage, ConversationKey};
use decora_types::error::StoreError;

use crate::chat::store::ChatStore;

/// Append-only two-party message log.
///
/// Sends are pure appends: a repeated send of an identical payload creates
/// a duplicate entry. That matches at-least-once delivery from clients and
/// is preserved deliberately.
pub struct ChatLog<S: ChatStore> {
    store: S,
}

impl<S: ChatStore> ChatLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Append a message to the conversation between its sender and
    /// receiver.
    pub async fn send_message(&self, message: ChatMessage) -> Result<(), StoreError> {
        let key = ConversationKey::new(&message.sender, &message.receiver);
        debug!(conversation = %key, "appending chat message");
        self.store.append(&key, message).await
    }

    /// All messages between two participants, in insertion order.
    ///
    /// The pair may be given in either order. A conversation with no
    /// messages yields an empty list, not an error. No pagination.
    pub async fn get_history(
        &self,
        user1: &str,
        user2: &str,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let key = ConversationKey::new(user1, user2);
        self.store.history(&key).await
    }
}
