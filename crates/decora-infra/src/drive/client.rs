//! DriveClient -- concrete [`FileHost`] implementation for Google Drive v3.
//!
//! File creation uses the `uploadType=multipart` endpoint with a
//! hand-assembled `multipart/related` body (reqwest's multipart support
//! only produces `multipart/form-data`, which Drive rejects).

use std::time::Duration;

use tracing::debug;

use decora_core::upload::FileHost;
use decora_types::credential::StoredCredential;
use decora_types::error::UploadError;

use super::types::{CreatedFile, FileMetadata, PermissionRequest};

const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart";
const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// Boundary separating the metadata and media parts of an upload body.
const MULTIPART_BOUNDARY: &str = "decora_drive_upload";

/// Google Drive v3 client.
pub struct DriveClient {
    client: reqwest::Client,
}

impl DriveClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self { client }
    }

    /// Assemble the `multipart/related` body: a JSON metadata part followed
    /// by the media part.
    fn multipart_body(metadata_json: &str, mime_type: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = Vec::with_capacity(bytes.len() + 512);
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata_json}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!("--{MULTIPART_BOUNDARY}\r\nContent-Type: {mime_type}\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
        body
    }
}

impl Default for DriveClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHost for DriveClient {
    async fn create_file(
        &self,
        credential: &StoredCredential,
        filename: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        let metadata = FileMetadata {
            name: filename.to_string(),
        };
        let metadata_json = serde_json::to_string(&metadata)
            .map_err(|e| UploadError::Create(e.to_string()))?;
        let body = Self::multipart_body(&metadata_json, mime_type, &bytes);

        let response = self
            .client
            .post(UPLOAD_URL)
            .bearer_auth(&credential.access_token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| UploadError::Create(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(UploadError::Create(format!("HTTP {status}: {text}")));
        }

        let created = response
            .json::<CreatedFile>()
            .await
            .map_err(|e| UploadError::Create(format!("malformed create response: {e}")))?;
        debug!(file_id = %created.id, "drive file created");
        Ok(created.id)
    }

    async fn share_publicly(
        &self,
        credential: &StoredCredential,
        file_id: &str,
    ) -> Result<(), UploadError> {
        let url = format!("{FILES_URL}/{file_id}/permissions");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&credential.access_token)
            .json(&PermissionRequest::anyone_reader())
            .send()
            .await
            .map_err(|e| UploadError::Permission(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(UploadError::Permission(format!("HTTP {status}: {text}")));
        }
        Ok(())
    }

    fn view_url(&self, file_id: &str) -> String {
        format!("https://drive.google.com/file/d/{file_id}/view")
    }
}
