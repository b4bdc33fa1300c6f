//! GeminiClient -- concrete [`TextGenerator`] and [`MultimodalGenerator`]
//! implementation for the Gemini `generateContent` REST API.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and only exposed
//! when constructing the request header; it never appears in Debug output
//! or tracing logs.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use tracing::{Instrument, info_span};

use decora_core::generation::{MultimodalGenerator, TextGenerator};
use decora_observe::genai_attrs;
use decora_types::conversation::{ConversationTurn, TurnPart, TurnRole};
use decora_types::error::GenerationError;

use super::types::{
    GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiResponse, GeminiTool,
};

/// Gemini REST client serving both the plain chat model and the
/// image-capable multimodal model.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    chat_model: String,
    image_model: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(api_key: SecretString, chat_model: String, image_model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300)) // 5 min timeout for long generations
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            chat_model,
            image_model,
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn generate_content(
        &self,
        model: &str,
        body: &GeminiRequest,
    ) -> Result<GeminiResponse, GenerationError> {
        let url = format!("{}/v1beta/models/{model}:generateContent", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(body)
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

        response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| GenerationError::Deserialization(e.to_string()))
    }

    /// The first candidate's parts, or `EmptyResponse` when the model
    /// returned no candidate content at all.
    fn first_candidate_parts(response: GeminiResponse) -> Result<Vec<GeminiPart>, GenerationError> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts)
            .ok_or(GenerationError::EmptyResponse)
    }
}

impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart::text(prompt)],
            }],
            tools: None,
            generation_config: None,
        };

        let span = info_span!(
            "chat",
            gen_ai.operation.name = genai_attrs::OP_CHAT,
            gen_ai.provider.name = genai_attrs::PROVIDER_GEMINI,
            gen_ai.request.model = %self.chat_model,
        );

        let response = self
            .generate_content(&self.chat_model, &body)
            .instrument(span)
            .await?;

        let parts = Self::first_candidate_parts(response)?;
        parts
            .into_iter()
            .find_map(|part| part.text)
            .ok_or(GenerationError::EmptyResponse)
    }
}

impl MultimodalGenerator for GeminiClient {
    async fn generate_turn(
        &self,
        history: &[ConversationTurn],
    ) -> Result<Vec<TurnPart>, GenerationError> {
        let contents = history.iter().map(content_from_turn).collect();
        let body = GeminiRequest {
            contents,
            tools: Some(vec![GeminiTool::google_search()]),
            generation_config: Some(GeminiGenerationConfig::text_and_image()),
        };

        let span = info_span!(
            "multimodal_chat",
            gen_ai.operation.name = genai_attrs::OP_MULTIMODAL_CHAT,
            gen_ai.provider.name = genai_attrs::PROVIDER_GEMINI,
            gen_ai.request.model = %self.image_model,
        );

        let response = self
            .generate_content(&self.image_model, &body)
            .instrument(span)
            .await?;

        let parts = Self::first_candidate_parts(response)?;
        parts.into_iter().filter_map(turn_part_from_wire).collect()
    }
}

fn content_from_turn(turn: &ConversationTurn) -> GeminiContent {
    let role = match turn.role {
        TurnRole::User => "user",
        TurnRole::Model => "model",
    };
    let parts = turn
        .parts
        .iter()
        .map(|part| match part {
            TurnPart::Text(text) => GeminiPart::text(text.clone()),
            TurnPart::Image { mime_type, data } => {
                GeminiPart::inline_data(mime_type.clone(), BASE64.encode(data))
            }
        })
        .collect();

    GeminiContent {
        role: Some(role.to_string()),
        parts,
    }
}

/// Convert one wire part to a domain part. Parts with neither text nor
/// inline data (e.g., pure tool metadata) are skipped; inline data that
/// fails base64 decoding is an error.
fn turn_part_from_wire(part: GeminiPart) -> Option<Result<TurnPart, GenerationError>> {
    if let Some(text) = part.text {
        return Some(Ok(TurnPart::Text(text)));
    }
    if let Some(inline) = part.inline_data {
        return Some(
            BASE64
                .decode(inline.data.as_bytes())
                .map(|data| TurnPart::Image {
                    mime_type: inline.mime_type,
                    data,
                })
                .map_err(|e| GenerationError::Deserialization(format!("inline data: {e}"))),
        );
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_from_turn_encodes_inline_images() {
        let turn = ConversationTurn::user(vec![
            TurnPart::Text("use this".to_string()),
            TurnPart::Image {
                mime_type: "image/png".to_string(),
                data: vec![1, 2, 3],
            },
        ]);

        let content = content_from_turn(&turn);
        assert_eq!(content.role.as_deref(), Some("user"));
        assert_eq!(content.parts[0].text.as_deref(), Some("use this"));
        let inline = content.parts[1].inline_data.as_ref().unwrap();
        assert_eq!(inline.data, BASE64.encode([1u8, 2, 3]));
    }

    #[test]
    fn test_turn_part_from_wire_decodes_inline_data() {
        let part = GeminiPart::inline_data("image/png", BASE64.encode([9u8, 8, 7]));
        let decoded = turn_part_from_wire(part).unwrap().unwrap();
        assert_eq!(
            decoded,
            TurnPart::Image {
                mime_type: "image/png".to_string(),
                data: vec![9, 8, 7],
            }
        );
    }

    #[test]
    fn test_turn_part_from_wire_skips_empty_parts() {
        assert!(turn_part_from_wire(GeminiPart::default()).is_none());
    }

    #[test]
    fn test_turn_part_from_wire_rejects_bad_base64() {
        let part = GeminiPart::inline_data("image/png", "!!not-base64!!".to_string());
        let err = turn_part_from_wire(part).unwrap().unwrap_err();
        assert!(matches!(err, GenerationError::Deserialization(_)));
    }

    #[test]
    fn test_first_candidate_parts_empty_is_error() {
        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        let err = GeminiClient::first_candidate_parts(response).unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse));
    }
}
