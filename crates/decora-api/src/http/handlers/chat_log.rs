//! Two-party chat log endpoints.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::json;

use decora_types::chat::ChatMessage;

use crate::http::error::AppError;
use crate::state::AppState;

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user1: Option<String>,
    pub user2: Option<String>,
}

/// POST /chat/send — append a message to its conversation.
pub async fn send_message(
    State(state): State<AppState>,
    Json(message): Json<ChatMessage>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.chat_log.send_message(message).await?;
    Ok(Json(json!({ "status": "ok" })))
}

/// GET /chat/history?user1=&user2= — all messages between two users, in
/// insertion order. The pair may be given in either order; an unknown
/// conversation is an empty list.
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let user1 = query
        .user1
        .ok_or_else(|| AppError::Validation("missing query parameter 'user1'".to_string()))?;
    let user2 = query
        .user2
        .ok_or_else(|| AppError::Validation("missing query parameter 'user2'".to_string()))?;

    let history = state.chat_log.get_history(&user1, &user2).await?;
    Ok(Json(history))
}
