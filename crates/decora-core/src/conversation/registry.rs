//! SessionRegistry trait definition.

use decora_types::conversation::ConversationTurn;
use decora_types::error::StoreError;

/// Registry of multi-turn conversation sessions, keyed by a caller-supplied
/// session identifier.
///
/// A session is created lazily on first use: reading an unknown identifier
/// yields an empty history. Implementations live in decora-infra (e.g.,
/// `InMemorySessionRegistry`).
pub trait SessionRegistry: Send + Sync {
    /// The accumulated turn history for a session, oldest first.
    fn history(
        &self,
        chat_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ConversationTurn>, StoreError>> + Send;

    /// Record a completed exchange: the user turn followed by the model
    /// turn it produced. Appended atomically per session.
    fn record_exchange(
        &self,
        chat_id: &str,
        user: ConversationTurn,
        model: ConversationTurn,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
