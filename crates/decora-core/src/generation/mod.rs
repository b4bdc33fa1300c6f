//! Generation backend abstractions for Decora.
//!
//! Defines the traits the relay and conversation services drive:
//! - `TextGenerator`: prompt in, generated text out.
//! - `ImageGenerator`: text-to-image and image-to-image diffusion.
//! - `MultimodalGenerator`: multi-turn mixed text/image generation.
//!
//! Implementations live in decora-infra. All traits use native async fn in
//! traits (RPITIT, Rust 2024 edition).

pub mod gate;

pub use gate::GenerationGate;

use decora_types::conversation::{ConversationTurn, TurnPart};
use decora_types::error::GenerationError;

/// Fixed generation parameters shared by the diffusion pipelines.
///
/// The defaults (30 steps, strength 0.75, 512x512) define the service's
/// behavior; configuration may override them but must preserve these values
/// to match it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationDefaults {
    /// Inference step budget per generation.
    pub steps: u32,
    /// Denoising strength for image-to-image. Higher values let the prompt
    /// dominate over the seed image content.
    pub strength: f32,
    /// Canonical square resolution the diffusion pipeline expects.
    pub image_size: u32,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            steps: 30,
            strength: 0.75,
            image_size: 512,
        }
    }
}

/// A text-to-image generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct Txt2ImgRequest {
    pub prompt: String,
    pub steps: u32,
    pub width: u32,
    pub height: u32,
}

/// An image-to-image generation call.
///
/// `seed_png` is the PNG-encoded seed image, already normalized to the
/// pipeline's canonical resolution by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Img2ImgRequest {
    pub prompt: String,
    pub seed_png: Vec<u8>,
    pub strength: f32,
    pub steps: u32,
    pub width: u32,
    pub height: u32,
}

/// Text generation backend (prompt in, text out).
pub trait TextGenerator: Send + Sync {
    /// Generate a text completion for the given prompt.
    fn generate_text(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, GenerationError>> + Send;
}

/// Diffusion image generation backend.
///
/// Both operations return encoded image bytes (PNG for a WebUI-compatible
/// server). Callers must hold a [`GenerationGate`] permit across either
/// call: the underlying pipeline is not safe for concurrent invocation.
pub trait ImageGenerator: Send + Sync {
    /// Generate an image from a text prompt alone.
    fn text_to_image(
        &self,
        request: &Txt2ImgRequest,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, GenerationError>> + Send;

    /// Generate an image from a prompt plus a seed image.
    fn image_to_image(
        &self,
        request: &Img2ImgRequest,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, GenerationError>> + Send;
}

/// Multi-turn, mixed text/image generation backend.
///
/// The full turn history is replayed on every call; the backend answers
/// with the parts of the next model turn.
pub trait MultimodalGenerator: Send + Sync {
    /// Generate the next model turn for the given conversation history.
    fn generate_turn(
        &self,
        history: &[ConversationTurn],
    ) -> impl std::future::Future<Output = Result<Vec<TurnPart>, GenerationError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_defaults() {
        let defaults = GenerationDefaults::default();
        assert_eq!(defaults.steps, 30);
        assert!((defaults.strength - 0.75).abs() < f32::EPSILON);
        assert_eq!(defaults.image_size, 512);
    }
}
