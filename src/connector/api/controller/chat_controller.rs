use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ConversationLog;

use super::super::error::{ApiError, EMPTY_MESSAGE, INVALID_BODY};
use super::super::Container;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    #[serde(rename = "chatHistory")]
    pub chat_history: ConversationLog,
}

/// POST /api/chat
pub async fn send_message(
    State(container): State<Arc<Container>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        debug!("Rejected chat request body: {}", e);
        ApiError::Validation(INVALID_BODY.to_string())
    })?;

    let message = request
        .message
        .ok_or_else(|| ApiError::Validation(EMPTY_MESSAGE.to_string()))?;

    let chat_history = container.send_message_use_case().execute(&message).await?;

    Ok(Json(ChatResponse { chat_history }))
}
