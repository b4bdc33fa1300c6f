//! Application configuration loader for Decora.
//!
//! Reads `config.toml` and deserializes it into [`AppConfig`]. Falls back
//! to sensible defaults when the file is missing or malformed.

use std::path::Path;

use decora_types::config::AppConfig;

/// Load application configuration from `config_path`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the
///   default.
/// - If the file exists and parses successfully, returns the parsed config
///   (missing sections fill in from their defaults).
pub async fn load_app_config(config_path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_app_config(&dir.path().join("config.toml")).await;
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.diffusion.steps, 30);
    }

    #[tokio::test]
    async fn test_valid_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
host = "0.0.0.0"
port = 9100

[gemini]
chat_model = "gemini-2.5-pro"
"#
        )
        .unwrap();

        let config = load_app_config(&path).await;
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.gemini.chat_model, "gemini-2.5-pro");
        // Untouched sections keep their defaults.
        assert_eq!(config.diffusion.base_url, "http://127.0.0.1:7860");
    }

    #[tokio::test]
    async fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is [not toml").unwrap();

        let config = load_app_config(&path).await;
        assert_eq!(config.server.port, 8000);
    }
}
