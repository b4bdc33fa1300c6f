//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST
//! API. Services are generic over the backend traits, but AppState pins
//! them to the concrete infra implementations.

use std::path::Path;
use std::sync::Arc;

use secrecy::SecretString;

use decora_core::chat::ChatLog;
use decora_core::conversation::ConversationService;
use decora_core::credential::CredentialManager;
use decora_core::generation::{GenerationDefaults, GenerationGate};
use decora_core::relay::RelayService;
use decora_core::upload::UploadService;
use decora_infra::auth::{ClientSecret, FileTokenCache, GoogleAuthClient};
use decora_infra::clock::SystemClock;
use decora_infra::diffusion::SdWebuiClient;
use decora_infra::drive::DriveClient;
use decora_infra::gemini::GeminiClient;
use decora_infra::store::{InMemoryChatStore, InMemorySessionRegistry};
use decora_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra
/// implementations.
pub type ConcreteRelayService = RelayService<GeminiClient, SdWebuiClient>;

pub type ConcreteConversationService = ConversationService<GeminiClient, InMemorySessionRegistry>;

pub type ConcreteChatLog = ChatLog<InMemoryChatStore>;

pub type ConcreteUploadService =
    UploadService<DriveClient, SystemClock, FileTokenCache, GoogleAuthClient>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConcreteRelayService>,
    pub conversation: Arc<ConcreteConversationService>,
    pub chat_log: Arc<ConcreteChatLog>,
    /// Absent when the Drive client secret is not provisioned.
    pub upload: Option<Arc<ConcreteUploadService>>,
    pub config: AppConfig,
}

impl AppState {
    /// Initialize the application state: read the API key, wire services.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        // The Gemini API key comes from the environment, never from the
        // config file.
        let api_key = match std::env::var(&config.gemini.api_key_env) {
            Ok(key) => key,
            Err(_) => {
                tracing::warn!(
                    variable = %config.gemini.api_key_env,
                    "Gemini API key not set; generation calls will be rejected upstream"
                );
                String::new()
            }
        };

        let defaults = GenerationDefaults {
            steps: config.diffusion.steps,
            strength: config.diffusion.strength,
            image_size: config.diffusion.image_size,
        };
        let gate = GenerationGate::new(config.diffusion.max_concurrency);

        let relay = RelayService::new(
            GeminiClient::new(
                SecretString::from(api_key.clone()),
                config.gemini.chat_model.clone(),
                config.gemini.image_model.clone(),
            ),
            SdWebuiClient::new(config.diffusion.base_url.clone()),
            gate,
            defaults,
        );

        // The conversation service owns its own Gemini client (the relay
        // service owns the other one internally).
        let conversation = ConversationService::new(
            GeminiClient::new(
                SecretString::from(api_key),
                config.gemini.chat_model.clone(),
                config.gemini.image_model.clone(),
            ),
            InMemorySessionRegistry::new(),
        );

        let chat_log = ChatLog::new(InMemoryChatStore::new());

        // A missing client secret disables Drive uploads; everything else
        // still serves.
        let upload = match ClientSecret::load(Path::new(&config.drive.client_secret_path)).await {
            Ok(secret) => {
                let credentials = CredentialManager::new(
                    SystemClock,
                    FileTokenCache::new(&config.drive.token_cache_path),
                    GoogleAuthClient::new(secret),
                );
                Some(Arc::new(UploadService::new(DriveClient::new(), credentials)))
            }
            Err(err) => {
                tracing::warn!(error = %err, "Drive uploads disabled");
                None
            }
        };

        Ok(Self {
            relay: Arc::new(relay),
            conversation: Arc::new(conversation),
            chat_log: Arc::new(chat_log),
            upload,
            config,
        })
    }
}
