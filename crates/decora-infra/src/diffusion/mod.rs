//! Stable Diffusion WebUI-compatible HTTP client.
//!
//! Drives the `/sdapi/v1/txt2img` and `/sdapi/v1/img2img` endpoints of a
//! locally running WebUI server; images travel as base64 PNG in both
//! directions.

pub mod client;
pub mod types;

pub use client::SdWebuiClient;
