use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::domain::ConversationLog;

use super::super::Container;

/// GET /api/history - the bare message array, not wrapped.
pub async fn get_history(State(container): State<Arc<Container>>) -> Json<ConversationLog> {
    Json(container.get_history_use_case().execute().await)
}
