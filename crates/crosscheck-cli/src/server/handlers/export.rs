//! CSV export handler.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use crosscheck::{write_csv, DatasetKind};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// GET /api/csv/export/:session_id/:file_type
///
/// Streams the stored rows back as a CSV attachment named
/// `<fileType>_<unix-millis>.csv`.
pub async fn export_csv(
    State(state): State<AppState>,
    Path((session_id, file_type)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let kind: DatasetKind = file_type.parse()?;
    let dataset = state.store.dataset(&session_id, kind)?;

    let mut body = Vec::new();
    write_csv(&dataset.rows, &dataset.headers, &mut body)?;

    let file_name = format!("{}_{}.csv", kind, chrono::Utc::now().timestamp_millis());
    let disposition = format!("attachment; filename=\"{}\"", file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
