//! DashMap-backed multimodal session registry.

use dashmap::DashMap;

use decora_core::conversation::SessionRegistry;
use decora_types::conversation::ConversationTurn;
use decora_types::error::StoreError;

/// Process-lifetime registry of conversation sessions, keyed by the
/// caller-supplied chat identifier. Sessions are created lazily on first
/// recorded exchange.
#[derive(Default)]
pub struct InMemorySessionRegistry {
    sessions: DashMap<String, Vec<ConversationTurn>>,
}

impl InMemorySessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRegistry for InMemorySessionRegistry {
    async fn history(&self, chat_id: &str) -> Result<Vec<ConversationTurn>, StoreError> {
        Ok(self
            .sessions
            .get(chat_id)
            .map(|turns| turns.clone())
            .unwrap_or_default())
    }

    async fn record_exchange(
        &self,
        chat_id: &str,
        user: ConversationTurn,
        model: ConversationTurn,
    ) -> Result<(), StoreError> {
        let mut turns = self.sessions.entry(chat_id.to_string()).or_default();
        turns.push(user);
        turns.push(model);
        Ok(())
    }
}
