//! Business logic and backend trait definitions for Decora.
//!
//! This crate defines the "ports" (generator, store, and identity traits)
//! that the infrastructure layer implements. It depends only on
//! `decora-types` -- never on `decora-infra` or any HTTP/IO crate.

pub mod chat;
pub mod conversation;
pub mod credential;
pub mod generation;
pub mod intent;
pub mod relay;
pub mod upload;
