//! Infrastructure layer for Decora.
//!
//! Contains implementations of the backend traits defined in `decora-core`:
//! reqwest clients for Gemini, a Stable Diffusion WebUI-compatible server,
//! Google Drive and Google OAuth, plus the file-based token cache, the
//! in-memory stores, and the `config.toml` loader.

pub mod auth;
pub mod clock;
pub mod config;
pub mod diffusion;
pub mod drive;
pub mod gemini;
pub mod store;
