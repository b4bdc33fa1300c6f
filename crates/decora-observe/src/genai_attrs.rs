//! OpenTelemetry GenAI Semantic Convention values for generation spans.
//!
//! Spans around calls to the generation backends carry the standard GenAI
//! attribute fields (`gen_ai.operation.name`, `gen_ai.provider.name`,
//! `gen_ai.request.model`); the constants here are the values recorded in
//! them, so every client names operations and providers the same way.
//!
//! Span naming convention: `"{operation} {model}"` (e.g., `"chat gemini-2.5-flash"`)

// --- Operation name values ---

/// Standard chat completion operation.
pub const OP_CHAT: &str = "chat";

/// Text-to-image diffusion operation.
pub const OP_TEXT_TO_IMAGE: &str = "text_to_image";

/// Image-to-image diffusion operation.
pub const OP_IMAGE_TO_IMAGE: &str = "image_to_image";

/// Multi-turn multimodal generation operation.
pub const OP_MULTIMODAL_CHAT: &str = "multimodal_chat";

// --- Provider name values ---

/// Gemini provider identifier.
pub const PROVIDER_GEMINI: &str = "gcp.gemini";

/// Stable Diffusion WebUI provider identifier.
pub const PROVIDER_SD_WEBUI: &str = "sd_webui";
