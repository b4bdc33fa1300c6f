//! HTTP request handlers for the REST API.

pub mod chat_log;
pub mod conversation;
pub mod relay;
pub mod upload;
