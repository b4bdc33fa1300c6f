//! Multi-turn multimodal conversation abstractions.
//!
//! The multimodal generation REST API is stateless, so the session registry
//! holds each conversation's turn history locally and replays it on every
//! call. This module defines the registry trait and the service that routes
//! the backend's reply parts.

pub mod registry;
pub mod service;

pub use registry::SessionRegistry;
pub use service::{ConversationReply, ConversationService};
