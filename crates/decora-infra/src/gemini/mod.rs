//! Gemini `generateContent` REST client.
//!
//! One client implements both core generator traits: plain text chat
//! against the chat model and multi-turn mixed text/image generation
//! against the image-capable model.

pub mod client;
pub mod types;

pub use client::GeminiClient;
