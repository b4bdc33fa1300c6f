//! Upload service: credential, create, share, URL.

use tracing::info;

use decora_types::error::UploadError;

use crate::credential::{Clock, CredentialManager, IdentityClient, TokenCache};

use super::host::FileHost;

/// Uploads a file to the hosting backend and returns its shareable URL.
///
/// Each upload obtains a credential through the full state machine -- there
/// is no cross-call caching of validity. A failure at any stage aborts the
/// whole operation; a file created before a permission failure is left
/// behind (no compensating delete).
pub struct UploadService<F, C, T, I>
where
    F: FileHost,
    C: Clock,
    T: TokenCache,
    I: IdentityClient,
{
    host: F,
    credentials: CredentialManager<C, T, I>,
}

impl<F, C, T, I> UploadService<F, C, T, I>
where
    F: FileHost,
    C: Clock,
    T: TokenCache,
    I: IdentityClient,
{
    pub fn new(host: F, credentials: CredentialManager<C, T, I>) -> Self {
        Self { host, credentials }
    }

    /// Upload `bytes` under `filename` and return the shareable view URL.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<String, UploadError> {
        let credential = self.credentials.obtain().await?;

        let file_id = self
            .host
            .create_file(&credential, filename, mime_type, bytes)
            .await?;
        self.host.share_publicly(&credential, &file_id).await?;

        let url = self.host.view_url(&file_id);
        info!(%file_id, "file uploaded and shared");
        Ok(url)
    }
}
