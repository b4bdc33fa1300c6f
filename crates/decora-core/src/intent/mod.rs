//! Intent classification for inbound chat messages.
//!
//! This module decides whether a free-text message is a conversational
//! question or a request to produce an image. The decision drives routing
//! in the relay service.

pub mod classifier;

pub use classifier::classify;
