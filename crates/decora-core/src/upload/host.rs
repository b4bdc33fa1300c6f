//! FileHost trait definition.

use decora_types::credential::StoredCredential;
use decora_types::error::UploadError;

/// A file-hosting backend that turns bytes into a shareable URL.
///
/// Implementations live in decora-infra (e.g., `DriveClient`). Uses native
/// async fn in traits (RPITIT, Rust 2024 edition).
pub trait FileHost: Send + Sync {
    /// Create a file resource from raw bytes and return its identifier.
    fn create_file(
        &self,
        credential: &StoredCredential,
        filename: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<String, UploadError>> + Send;

    /// Grant public read access to an existing file resource.
    fn share_publicly(
        &self,
        credential: &StoredCredential,
        file_id: &str,
    ) -> impl std::future::Future<Output = Result<(), UploadError>> + Send;

    /// The shareable view URL for a file identifier.
    fn view_url(&self, file_id: &str) -> String;
}
