//! Request routing between the text and image generation backends.
//!
//! The relay service classifies inbound chat messages and dispatches them
//! to the text model or the diffusion pipeline, and drives the explicit
//! decorate (text-to-image / image-to-image) pipeline.

pub mod image_ops;
pub mod service;

pub use service::{ChatReply, RelayService};
