//! ChatStore trait definition.

use decora_types::chat::{ChatMessage, ConversationKey};
use decora_types::error::StoreError;

/// Store for per-conversation message lists.
///
/// Implementations live in decora-infra (e.g., `InMemoryChatStore`) and
/// must provide append-atomic access per key: an append and a subsequent
/// read of the same key observe a consistent list. Uses native async fn in
/// traits (RPITIT, Rust 2024 edition).
pub trait ChatStore: Send + Sync {
    /// Append a message under a conversation key.
    fn append(
        &self,
        key: &ConversationKey,
        message: ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// All messages under a key, in insertion order. A key that was never
    /// written yields an empty list.
    fn history(
        &self,
        key: &ConversationKey,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, StoreError>> + Send;
}
