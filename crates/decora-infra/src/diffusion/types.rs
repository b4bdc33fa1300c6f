//! SD WebUI `/sdapi/v1` request/response types.

use serde::{Deserialize, Serialize};

/// Request body for `/sdapi/v1/txt2img`.
#[derive(Debug, Clone, Serialize)]
pub struct Txt2ImgPayload {
    pub prompt: String,
    pub steps: u32,
    pub width: u32,
    pub height: u32,
}

/// Request body for `/sdapi/v1/img2img`.
#[derive(Debug, Clone, Serialize)]
pub struct Img2ImgPayload {
    pub prompt: String,
    /// Base64-encoded seed images; the pipeline consumes the first.
    pub init_images: Vec<String>,
    pub denoising_strength: f32,
    pub steps: u32,
    pub width: u32,
    pub height: u32,
}

/// Response body shared by both generation endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResult {
    /// Base64-encoded generated images, PNG by server default.
    #[serde(default)]
    pub images: Vec<String>,
}
