//! In-memory store implementations.
//!
//! DashMap-backed stores with per-key append-atomic semantics: an append
//! holds the key's shard entry for the duration of the push, so a
//! subsequent read of the same key observes a consistent list. State lives
//! for the process lifetime only.

pub mod chat;
pub mod session;

pub use chat::InMemoryChatStore;
pub use session::InMemorySessionRegistry;
