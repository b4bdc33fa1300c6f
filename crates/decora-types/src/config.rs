//! Application configuration types.
//!
//! Deserialized from `config.toml` by the loader in `decora-infra`. Every
//! field has a default so a missing or partial file still yields a usable
//! configuration.

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub diffusion: DiffusionConfig,
    pub drive: DriveConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Gemini backend settings.
///
/// The API key itself is never stored in the file; `api_key_env` names the
/// environment variable it is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Model used for plain text chat replies.
    pub chat_model: String,
    /// Image-and-text-capable model used for the multi-turn endpoints.
    pub image_model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            chat_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image-preview".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

/// Stable Diffusion WebUI backend settings and generation defaults.
///
/// `steps`, `strength`, and `image_size` are exposed as configuration but
/// their defaults (30 / 0.75 / 512) define the service's behavior and must
/// not drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffusionConfig {
    pub base_url: String,
    /// Inference step budget per generation.
    pub steps: u32,
    /// Denoising strength for image-to-image; higher lets the prompt
    /// dominate over the seed image content.
    pub strength: f32,
    /// Canonical square resolution the pipeline expects.
    pub image_size: u32,
    /// Concurrent generations allowed against the pipeline.
    pub max_concurrency: usize,
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:7860".to_string(),
            steps: 30,
            strength: 0.75,
            image_size: 512,
            max_concurrency: 1,
        }
    }
}

/// Google Drive integration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// OAuth client-secret descriptor, provisioned out of band.
    pub client_secret_path: String,
    /// Token cache written by the credential store.
    pub token_cache_path: String,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            client_secret_path: "client_secret.json".to_string(),
            token_cache_path: "token_cache.json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.gemini.chat_model, "gemini-2.5-flash");
        assert_eq!(config.diffusion.steps, 30);
        assert!((config.diffusion.strength - 0.75).abs() < f32::EPSILON);
        assert_eq!(config.diffusion.image_size, 512);
        assert_eq!(config.diffusion.max_concurrency, 1);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml = r#"
[server]
port = 9000

[diffusion]
base_url = "http://10.0.0.5:7860"
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.diffusion.base_url, "http://10.0.0.5:7860");
        assert_eq!(config.diffusion.steps, 30);
        assert_eq!(config.drive.token_cache_path, "token_cache.json");
    }
}
