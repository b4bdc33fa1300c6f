//! Shared domain types for Decora.
//!
//! This crate contains the core domain types used across the Decora relay:
//! chat messages and conversation keys, intent classification results,
//! multimodal conversation turns, OAuth credential records, configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod conversation;
pub mod credential;
pub mod error;
pub mod intent;
