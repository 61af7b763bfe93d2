//! Session lifecycle handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::server::state::AppState;

/// Response after deleting a session.
#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// DELETE /api/csv/session/:session_id
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<DeleteResponse> {
    let success = state.store.remove(&session_id);
    let message = if success {
        "Session deleted successfully"
    } else {
        "Session not found"
    };

    Json(DeleteResponse {
        success,
        message: message.to_string(),
    })
}
