//! JSON-file token cache.

use std::path::PathBuf;

use decora_core::credential::TokenCache;
use decora_types::credential::StoredCredential;
use decora_types::error::CredentialError;

/// Persists the credential slot as pretty-printed JSON at a fixed path.
///
/// A missing file means no cached credential; an unreadable or unparsable
/// file is an error the credential manager downgrades to "absent".
pub struct FileTokenCache {
    path: PathBuf,
}

impl FileTokenCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenCache for FileTokenCache {
    async fn load(&self) -> Result<Option<StoredCredential>, CredentialError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(CredentialError::Cache(format!(
                    "read {}: {err}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|err| CredentialError::Cache(format!("parse {}: {err}", self.path.display())))
    }

    async fn store(&self, credential: &StoredCredential) -> Result<(), CredentialError> {
        let json = serde_json::to_string_pretty(credential)
            .map_err(|err| CredentialError::Cache(err.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|err| {
                CredentialError::Cache(format!("write {}: {err}", self.path.display()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};

    fn credential() -> StoredCredential {
        StoredCredential {
            access_token: "ya29.sample".to_string(),
            refresh_token: Some("1//refresh".to_string()),
            expiry: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            scopes: vec!["https://www.googleapis.com/auth/drive.file".to_string()],
        }
    }

    #[tokio::test]
    async fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileTokenCache::new(dir.path().join("token_cache.json"));

        cache.store(&credential()).await.unwrap();
        let loaded = cache.load().await.unwrap();
        assert_eq!(loaded, Some(credential()));
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileTokenCache::new(dir.path().join("token_cache.json"));
        assert_eq!(cache.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_cache_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token_cache.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileTokenCache::new(path).load().await.unwrap_err();
        assert!(matches!(err, CredentialError::Cache(_)));
    }

    #[tokio::test]
    async fn test_store_overwrites_previous_credential() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileTokenCache::new(dir.path().join("token_cache.json"));

        cache.store(&credential()).await.unwrap();
        let mut newer = credential();
        newer.access_token = "ya29.newer".to_string();
        cache.store(&newer).await.unwrap();

        let loaded = cache.load().await.unwrap().unwrap();
        assert_eq!(loaded.access_token, "ya29.newer");
    }
}
