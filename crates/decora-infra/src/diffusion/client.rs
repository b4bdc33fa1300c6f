//! SdWebuiClient -- concrete [`ImageGenerator`] implementation for a
//! Stable Diffusion WebUI-compatible server.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{Instrument, info_span};

use decora_core::generation::{ImageGenerator, Img2ImgRequest, Txt2ImgRequest};
use decora_observe::genai_attrs;
use decora_types::error::GenerationError;

use super::types::{GenerationResult, Img2ImgPayload, Txt2ImgPayload};

/// HTTP client for the WebUI `/sdapi/v1` generation endpoints.
pub struct SdWebuiClient {
    client: reqwest::Client,
    base_url: String,
}

impl SdWebuiClient {
    /// Create a client against the given server base URL
    /// (e.g., `http://127.0.0.1:7860`).
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            // Diffusion on CPU can take minutes per image.
            .timeout(Duration::from_secs(600))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn generate<P: serde::Serialize>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<Vec<u8>, GenerationError> {
        let url = format!("{}{path}", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| GenerationError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Provider {
                message: format!("HTTP {status}: {text}"),
            });
        }

        let result = response
            .json::<GenerationResult>()
            .await
            .map_err(|e| GenerationError::Deserialization(e.to_string()))?;

        let first = result
            .images
            .into_iter()
            .next()
            .ok_or(GenerationError::EmptyResponse)?;
        BASE64
            .decode(first.as_bytes())
            .map_err(|e| GenerationError::Deserialization(format!("image payload: {e}")))
    }
}

impl ImageGenerator for SdWebuiClient {
    async fn text_to_image(&self, request: &Txt2ImgRequest) -> Result<Vec<u8>, GenerationError> {
        let payload = Txt2ImgPayload {
            prompt: request.prompt.clone(),
            steps: request.steps,
            width: request.width,
            height: request.height,
        };

        let span = info_span!(
            "text_to_image",
            gen_ai.operation.name = genai_attrs::OP_TEXT_TO_IMAGE,
            gen_ai.provider.name = genai_attrs::PROVIDER_SD_WEBUI,
            steps = request.steps,
        );

        self.generate("/sdapi/v1/txt2img", &payload)
            .instrument(span)
            .await
    }

    async fn image_to_image(&self, request: &Img2ImgRequest) -> Result<Vec<u8>, GenerationError> {
        let payload = Img2ImgPayload {
            prompt: request.prompt.clone(),
            init_images: vec![BASE64.encode(&request.seed_png)],
            denoising_strength: request.strength,
            steps: request.steps,
            width: request.width,
            height: request.height,
        };

        let span = info_span!(
            "image_to_image",
            gen_ai.operation.name = genai_attrs::OP_IMAGE_TO_IMAGE,
            gen_ai.provider.name = genai_attrs::PROVIDER_SD_WEBUI,
            steps = request.steps,
            strength = request.strength,
        );

        self.generate("/sdapi/v1/img2img", &payload)
            .instrument(span)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = SdWebuiClient::new("http://127.0.0.1:7860/".to_string());
        assert_eq!(client.base_url, "http://127.0.0.1:7860");
    }
}
