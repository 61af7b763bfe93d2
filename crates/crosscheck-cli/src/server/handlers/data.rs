//! Dataset read and update handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use crosscheck::{sanitize_json_rows, validate_row, Dataset, DatasetKind, JsonRow};
use serde::{Deserialize, Serialize};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response for the data endpoint.
#[derive(Serialize)]
pub struct DataResponse {
    pub success: bool,
    #[serde(flatten)]
    pub dataset: Dataset,
}

/// GET /api/csv/data/:session_id/:file_type
pub async fn get_data(
    State(state): State<AppState>,
    Path((session_id, file_type)): Path<(String, String)>,
) -> Result<Json<DataResponse>, ApiError> {
    let kind: DatasetKind = file_type.parse()?;
    let dataset = state.store.dataset(&session_id, kind)?;

    Ok(Json(DataResponse {
        success: true,
        dataset,
    }))
}

/// Request body for replacing a dataset's rows.
///
/// Fields default so an incomplete body reaches the handler's own check.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub data: Option<Vec<JsonRow>>,
}

/// A row with blank required fields after an edit.
#[derive(Serialize)]
pub struct RowProblem {
    pub row: usize,
    pub errors: Vec<String>,
}

/// Response after an update.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub success: bool,
    pub row_count: usize,
    pub last_modified: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub row_problems: Vec<RowProblem>,
}

/// PUT /api/csv/update
pub async fn update_data(
    State(state): State<AppState>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let Json(req) = payload?;
    let data = match req.data {
        Some(data) if !req.session_id.trim().is_empty() && !req.file_type.trim().is_empty() => data,
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required fields: sessionId, fileType, or data".to_string(),
            ));
        }
    };
    let kind: DatasetKind = req.file_type.parse()?;

    let rows = sanitize_json_rows(&data);
    let row_problems: Vec<RowProblem> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let errors = validate_row(row, kind);
            (!errors.is_empty()).then_some(RowProblem { row: i + 1, errors })
        })
        .collect();
    let row_count = rows.len();

    let last_modified = state.store.update_rows(&req.session_id, kind, rows)?;

    Ok(Json(UpdateResponse {
        success: true,
        row_count,
        last_modified,
        row_problems,
    }))
}
