//! DashMap-backed chat message store.

use dashmap::DashMap;

use decora_core::chat::ChatStore;
use decora_types::chat::{ChatMessage, ConversationKey};
use decora_types::error::StoreError;

/// Process-lifetime chat store keyed by normalized conversation key.
#[derive(Default)]
pub struct InMemoryChatStore {
    conversations: DashMap<ConversationKey, Vec<ChatMessage>>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChatStore for InMemoryChatStore {
    async fn append(&self, key: &ConversationKey, message: ChatMessage) -> Result<(), StoreError> {
        // entry() holds the shard lock across the push, making the append
        // atomic with respect to concurrent readers of the same key.
        self.conversations
            .entry(key.clone())
            .or_default()
            .push(message);
        Ok(())
    }

    async fn history(&self, key: &ConversationKey) -> Result<Vec<ChatMessage>, StoreError> {
        Ok(self
            .conversations
            .get(key)
            .map(|messages| messages.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: &str, timestamp: i64) -> ChatMessage {
        ChatMessage {
            sender: "alice".to_string(),
            receiver: "bob".to_string(),
            text: text.to_string(),
            timestamp,
        }
    }

    #[tokio::test]
    async fn test_append_preserves_insertion_order() {
        let store = InMemoryChatStore::new();
        let key = ConversationKey::new("alice", "bob");

        for (i, text) in ["one", "two", "three"].iter().enumerate() {
            store.append(&key, message(text, i as i64)).await.unwrap();
        }

        let history = store.history(&key).await.unwrap();
        let texts: Vec<_> = history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_unknown_key_yields_empty_history() {
        let store = InMemoryChatStore::new();
        let key = ConversationKey::new("nobody", "noone");
        assert!(store.history(&key).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_appends_all_land() {
        let store = std::sync::Arc::new(InMemoryChatStore::new());
        let key = ConversationKey::new("alice", "bob");

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                store.append(&key, message("m", i)).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.history(&key).await.unwrap().len(), 32);
    }
}
