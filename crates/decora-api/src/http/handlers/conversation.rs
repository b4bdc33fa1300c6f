//! Multimodal generation endpoints (one-shot edit and multi-turn chat).

use axum::Json;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use decora_core::conversation::ConversationReply;

use crate::http::error::AppError;
use crate::http::extractors::multipart::FormFields;
use crate::http::handlers::relay::png_response;
use crate::state::AppState;

/// POST /generate_gemini_image — one-shot image edit with a required seed.
///
/// Multipart fields: `prompt` and `file`, both required. Answers with
/// binary PNG when the model returns an image part, otherwise
/// `{"text": ...}`.
pub async fn generate_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let fields = FormFields::read(multipart).await?;
    let prompt = fields.require_text("prompt")?;
    let file = fields.require_file("file")?;

    let reply = state
        .conversation
        .edit_image(prompt, &file.content_type, file.bytes.clone())
        .await?;

    Ok(match reply {
        ConversationReply::Image(png) => png_response(png),
        ConversationReply::Text(parts) => {
            Json(json!({ "text": parts.join("\n") })).into_response()
        }
    })
}

/// POST /gemini_chat — next turn of a multi-turn session.
///
/// Multipart fields: `chat_id` and `message` (required), `file` (optional
/// attached image). Answers with binary PNG when any reply part is an
/// image, otherwise `{"results": [{"type": "text", "content": ...}]}`.
pub async fn gemini_chat(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let fields = FormFields::read(multipart).await?;
    let chat_id = fields.require_text("chat_id")?;
    let message = fields.require_text("message")?;
    let attachment = fields
        .file("file")
        .map(|file| (file.content_type.clone(), file.bytes.clone()));

    let reply = state.conversation.send(chat_id, message, attachment).await?;

    Ok(match reply {
        ConversationReply::Image(png) => png_response(png),
        ConversationReply::Text(parts) => {
            let results: Vec<_> = parts
                .into_iter()
                .map(|content| json!({ "type": "text", "content": content }))
                .collect();
            Json(json!({ "results": results })).into_response()
        }
    })
}
