//! Chat and decorate pipeline endpoints.

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;

use decora_core::relay::ChatReply;

use crate::http::error::AppError;
use crate::http::extractors::multipart::FormFields;
use crate::state::AppState;

/// Form body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    /// The user's free-text message.
    pub message: String,
}

/// POST /chat — classify a free-text message and answer it.
///
/// Text questions come back as `{"reply": ...}`; image requests come back
/// as binary PNG.
pub async fn chat(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<Response, AppError> {
    match state.relay.chat(&form.message).await? {
        ChatReply::Text(reply) => Ok(Json(json!({ "reply": reply })).into_response()),
        ChatReply::Image(png) => Ok(png_response(png)),
    }
}

/// POST /decorate — explicit image generation with an optional seed image.
///
/// Multipart fields: `prompt` (required, 400 when empty) and `file`
/// (optional seed image). Always answers with binary PNG.
pub async fn decorate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let fields = FormFields::read(multipart).await?;
    // An absent prompt and an empty one are the same client error.
    let prompt = fields.text("prompt").unwrap_or_default();
    let seed = fields.file("file").map(|file| file.bytes.as_slice());

    let png = state.relay.decorate(prompt, seed).await?;
    Ok(png_response(png))
}

/// Binary PNG response.
pub(crate) fn png_response(png: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], png).into_response()
}
