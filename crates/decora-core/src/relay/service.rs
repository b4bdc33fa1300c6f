//! Relay service routing chat and decorate requests to the right backend.
//!
//! Generic over `TextGenerator` and `ImageGenerator` to maintain clean
//! architecture (decora-core never depends on decora-infra).

use tracing::{debug, info};

use decora_types::error::RelayError;
use decora_types::intent::Intent;

use crate::generation::{
    GenerationDefaults, GenerationGate, ImageGenerator, Img2ImgRequest, TextGenerator,
    Txt2ImgRequest,
};
use crate::intent::classify;
use crate::relay::image_ops;

/// System preamble prepended to every text chat prompt.
pub const INTERIOR_ASSISTANT_PREAMBLE: &str = "You are an expert interior design assistant. \
Answer user questions about room decoration, furniture, color schemes, and home improvement \
in a helpful, concise, and friendly way.";

/// Reply from the chat pipeline: generated text or PNG image bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    Text(String),
    Image(Vec<u8>),
}

/// Routes inbound requests to the text model or the diffusion pipeline.
pub struct RelayService<T: TextGenerator, I: ImageGenerator> {
    text: T,
    image: I,
    gate: GenerationGate,
    defaults: GenerationDefaults,
}

impl<T: TextGenerator, I: ImageGenerator> RelayService<T, I> {
    /// Create a relay over the given backends.
    ///
    /// The gate is shared with any other service driving the same diffusion
    /// pipeline instance.
    pub fn new(
        text: T,
        image: I,
        gate: GenerationGate,
        defaults: GenerationDefaults,
    ) -> Self {
        Self {
            text,
            image,
            gate,
            defaults,
        }
    }

    /// Handle a free-text chat message.
    ///
    /// Classifies the message, then either answers it with the text model
    /// (wrapped in the interior-assistant preamble) or hands the raw message
    /// to the diffusion pipeline as a prompt.
    pub async fn chat(&self, message: &str) -> Result<ChatReply, RelayError> {
        let intent = classify(message);
        debug!(%intent, "chat message classified");

        match intent {
            Intent::Text => {
                let prompt =
                    format!("{INTERIOR_ASSISTANT_PREAMBLE}\nUser: {message}\nAssistant:");
                let reply = self.text.generate_text(&prompt).await?;
                Ok(ChatReply::Text(reply.trim().to_string()))
            }
            Intent::Image => {
                let png = self.text_to_image(message.trim()).await?;
                Ok(ChatReply::Image(png))
            }
        }
    }

    /// Handle an explicit image-generation request with an optional seed
    /// image.
    ///
    /// An empty (or whitespace-only) prompt is a client error and never
    /// reaches a backend. With a seed image present, the seed is decoded,
    /// normalized to RGB, resized to the canonical resolution, and run
    /// through image-to-image; otherwise the prompt alone runs through
    /// text-to-image. The result is always PNG bytes.
    pub async fn decorate(
        &self,
        prompt: &str,
        seed: Option<&[u8]>,
    ) -> Result<Vec<u8>, RelayError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(RelayError::EmptyPrompt);
        }

        match seed {
            None => self.text_to_image(prompt).await.map_err(RelayError::from),
            Some(bytes) => {
                let size = self.defaults.image_size;
                let seed_png = image_ops::normalize_seed(bytes, size)?;

                let request = Img2ImgRequest {
                    prompt: prompt.to_string(),
                    seed_png,
                    strength: self.defaults.strength,
                    steps: self.defaults.steps,
                    width: size,
                    height: size,
                };

                let _permit = self.gate.acquire().await;
                info!(steps = request.steps, strength = request.strength, "image-to-image generation");
                let png = self.image.image_to_image(&request).await?;
                Ok(image_ops::ensure_png(png)?)
            }
        }
    }

    async fn text_to_image(&self, prompt: &str) -> Result<Vec<u8>, decora_types::error::GenerationError> {
        let size = self.defaults.image_size;
        let request = Txt2ImgRequest {
            prompt: prompt.to_string(),
            steps: self.defaults.steps,
            width: size,
            height: size,
        };

        let _permit = self.gate.acquire().await;
        info!(steps = request.steps, "text-to-image generation");
        let png = self.image.text_to_image(&request).await?;
        image_ops::ensure_png(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use decora_types::error::GenerationError;

    fn tiny_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            width,
            height,
            image::Rgb([10, 20, 30]),
        ));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[derive(Default)]
    struct FakeTextGenerator {
        calls: AtomicUsize,
    }

    impl TextGenerator for FakeTextGenerator {
        async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(prompt.starts_with(INTERIOR_ASSISTANT_PREAMBLE));
            Ok("  Try a walnut sideboard.  ".to_string())
        }
    }

    #[derive(Default)]
    struct FakeImageGenerator {
        txt2img_calls: AtomicUsize,
        img2img_requests: Mutex<Vec<Img2ImgRequest>>,
    }

    impl ImageGenerator for FakeImageGenerator {
        async fn text_to_image(&self, request: &Txt2ImgRequest) -> Result<Vec<u8>, GenerationError> {
            self.txt2img_calls.fetch_add(1, Ordering::SeqCst);
            Ok(tiny_png(request.width, request.height))
        }

        async fn image_to_image(&self, request: &Img2ImgRequest) -> Result<Vec<u8>, GenerationError> {
            self.img2img_requests.lock().unwrap().push(request.clone());
            Ok(tiny_png(request.width, request.height))
        }
    }

    fn relay() -> RelayService<FakeTextGenerator, FakeImageGenerator> {
        RelayService::new(
            FakeTextGenerator::default(),
            FakeImageGenerator::default(),
            GenerationGate::new(1),
            GenerationDefaults::default(),
        )
    }

    #[tokio::test]
    async fn test_chat_text_message_uses_text_backend() {
        let relay = relay();
        let reply = relay.chat("What color goes with navy blue?").await.unwrap();
        assert_eq!(reply, ChatReply::Text("Try a walnut sideboard.".to_string()));
        assert_eq!(relay.text.calls.load(Ordering::SeqCst), 1);
        assert_eq!(relay.image.txt2img_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chat_image_message_uses_diffusion_backend() {
        let relay = relay();
        let reply = relay
            .chat("show me a picture of a minimalist bedroom")
            .await
            .unwrap();
        assert!(matches!(reply, ChatReply::Image(_)));
        assert_eq!(relay.text.calls.load(Ordering::SeqCst), 0);
        assert_eq!(relay.image.txt2img_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_decorate_empty_prompt_is_client_error() {
        let relay = relay();
        for prompt in ["", "   ", "\n\t"] {
            let err = relay.decorate(prompt, None).await.unwrap_err();
            assert!(matches!(err, RelayError::EmptyPrompt), "prompt: {prompt:?}");
        }
        // No backend was touched.
        assert_eq!(relay.image.txt2img_calls.load(Ordering::SeqCst), 0);
        assert!(relay.image.img2img_requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_decorate_without_seed_runs_txt2img() {
        let relay = relay();
        let png = relay.decorate("  a coastal lounge  ", None).await.unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
        assert_eq!(relay.image.txt2img_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_decorate_seed_is_resized_to_canonical_resolution() {
        let relay = relay();
        let seed = tiny_png(1024, 768);

        relay
            .decorate("swap the couch for a chaise", Some(&seed))
            .await
            .unwrap();

        let requests = relay.image.img2img_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.steps, 30);
        assert!((request.strength - 0.75).abs() < f32::EPSILON);
        assert_eq!((request.width, request.height), (512, 512));

        let decoded = image::load_from_memory(&request.seed_png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (512, 512));
    }

    #[tokio::test]
    async fn test_decorate_surfaces_backend_failure() {
        struct FailingImageGenerator;

        impl ImageGenerator for FailingImageGenerator {
            async fn text_to_image(&self, _: &Txt2ImgRequest) -> Result<Vec<u8>, GenerationError> {
                Err(GenerationError::Provider {
                    message: "HTTP 503: pipeline loading".to_string(),
                })
            }

            async fn image_to_image(&self, _: &Img2ImgRequest) -> Result<Vec<u8>, GenerationError> {
                unreachable!("no seed supplied")
            }
        }

        let relay = RelayService::new(
            FakeTextGenerator::default(),
            FailingImageGenerator,
            GenerationGate::new(1),
            GenerationDefaults::default(),
        );

        let err = relay.decorate("a den", None).await.unwrap_err();
        assert!(matches!(err, RelayError::Generation(_)));
        assert!(err.to_string().contains("HTTP 503"));
    }
}
