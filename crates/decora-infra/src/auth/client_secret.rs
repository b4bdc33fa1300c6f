//! OAuth client-secret descriptor, provisioned out of band.
//!
//! Google Cloud console downloads wrap the credentials under an
//! `"installed"` key for desktop apps or a `"web"` key for web apps; both
//! shapes are accepted.

use std::path::Path;

use serde::Deserialize;

use decora_types::error::CredentialError;

/// OAuth client credentials and endpoint URIs.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
}

#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

impl ClientSecret {
    /// Load and validate a `client_secret.json` descriptor.
    pub async fn load(path: &Path) -> Result<Self, CredentialError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|err| {
            CredentialError::ClientSecret(format!("read {}: {err}", path.display()))
        })?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self, CredentialError> {
        let file: ClientSecretFile = serde_json::from_str(content)
            .map_err(|err| CredentialError::ClientSecret(err.to_string()))?;

        let secret = file
            .installed
            .or(file.web)
            .ok_or_else(|| {
                CredentialError::ClientSecret(
                    "expected an \"installed\" or \"web\" section".to_string(),
                )
            })?;

        if secret.client_id.is_empty() || secret.client_secret.is_empty() {
            return Err(CredentialError::ClientSecret(
                "client_id and client_secret must be non-empty".to_string(),
            ));
        }
        Ok(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_installed_section() {
        let json = r#"{
            "installed": {
                "client_id": "abc.apps.googleusercontent.com",
                "client_secret": "shh",
                "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                "token_uri": "https://oauth2.googleapis.com/token",
                "redirect_uris": ["http://localhost"]
            }
        }"#;

        let secret = ClientSecret::parse(json).unwrap();
        assert_eq!(secret.client_id, "abc.apps.googleusercontent.com");
        assert_eq!(secret.token_uri, "https://oauth2.googleapis.com/token");
    }

    #[test]
    fn test_parses_web_section() {
        let json = r#"{
            "web": {
                "client_id": "web-id",
                "client_secret": "shh",
                "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                "token_uri": "https://oauth2.googleapis.com/token"
            }
        }"#;

        assert_eq!(ClientSecret::parse(json).unwrap().client_id, "web-id");
    }

    #[test]
    fn test_missing_sections_is_error() {
        let err = ClientSecret::parse("{}").unwrap_err();
        assert!(matches!(err, CredentialError::ClientSecret(_)));
    }

    #[test]
    fn test_empty_client_id_is_error() {
        let json = r#"{
            "installed": {
                "client_id": "",
                "client_secret": "shh",
                "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                "token_uri": "https://oauth2.googleapis.com/token"
            }
        }"#;
        assert!(ClientSecret::parse(json).is_err());
    }
}
