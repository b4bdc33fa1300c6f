//! Drive upload endpoint.

use axum::Json;
use axum::extract::{Multipart, State};
use serde_json::json;

use decora_types::error::CredentialError;

use crate::http::error::AppError;
use crate::http::extractors::multipart::FormFields;
use crate::state::AppState;

/// POST /upload_drive — upload a file and return its shareable URL.
///
/// Multipart field: `file` (required). The file lands on Drive with public
/// read access; the response carries the view URL.
pub async fn upload_drive(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let Some(upload) = state.upload.as_ref() else {
        return Err(AppError::Credential(CredentialError::ClientSecret(
            "Drive client secret is not provisioned".to_string(),
        )));
    };

    let fields = FormFields::read(multipart).await?;
    let file = fields.require_file("file")?;

    let url = upload
        .upload(file.bytes.clone(), &file.filename, &file.content_type)
        .await?;
    Ok(Json(json!({ "url": url })))
}
