//! Integrity validation handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use crosscheck::{CheckResult, DatasetKind};
use serde::Deserialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request body for validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    #[serde(default)]
    pub session_id: String,
}

/// POST /api/csv/validate
pub async fn validate_data(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<CheckResult>, ApiError> {
    let Json(req) = payload?;
    if req.session_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Session ID is required".to_string()));
    }

    let session = state.store.session(&req.session_id)?;
    let (Some(strings), Some(classifications)) = (
        session.datasets.get(&DatasetKind::Strings),
        session.datasets.get(&DatasetKind::Classifications),
    ) else {
        return Err(ApiError::BadRequest(
            "Both strings and classifications files are required for validation".to_string(),
        ));
    };

    let crosscheck = state.crosscheck.clone();
    let facts = strings.rows.clone();
    let references = classifications.rows.clone();
    let result = tokio::task::spawn_blocking(move || crosscheck.check_rows(&facts, &references))
        .await
        .map_err(|e| ApiError::Internal(format!("Validation task failed: {}", e)))?;

    tracing::info!(
        session = %req.session_id,
        valid = result.report.is_valid,
        errors = result.report.errors.len(),
        "validated session"
    );

    Ok(Json(result))
}
