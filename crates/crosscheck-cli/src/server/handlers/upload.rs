//! Multipart upload handler.

use std::collections::BTreeMap;

use axum::{
    extract::{Multipart, State},
    Json,
};
use crosscheck::schema::StructureReport;
use crosscheck::{validate_structure, DatasetKind, LoadedDataset, Row};
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// One parsed file in an upload response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub headers: Vec<String>,
    pub data: Vec<Row>,
    pub row_count: usize,
    /// Empty-row and missing-column findings for the file.
    pub structure: StructureReport,
}

/// Response for the upload endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub session_id: String,
    pub files: BTreeMap<DatasetKind, UploadedFile>,
}

/// POST /api/csv/upload
///
/// Accepts `strings` and/or `classifications` file fields. Every file is
/// parsed and header-checked before a session is opened, so a bad file
/// leaves no session behind.
pub async fn upload_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut loaded: Vec<LoadedDataset> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let kind: DatasetKind = name.parse()?;
        let file_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}.csv", kind));
        let bytes = field.bytes().await?;

        let dataset = state
            .crosscheck
            .load_upload(&bytes, &file_name, kind)
            .map_err(|e| ApiError::BadRequest(format!("Error processing {} file: {}", kind, e)))?;

        loaded.retain(|l| l.kind != kind);
        loaded.push(dataset);
    }

    if loaded.is_empty() {
        return Err(ApiError::BadRequest(
            "No files uploaded. Please upload both strings and classifications CSV files."
                .to_string(),
        ));
    }

    let session_id = state.store.create();
    let mut files = BTreeMap::new();

    for LoadedDataset { kind, dataset, .. } in loaded {
        let structure = validate_structure(&dataset.rows, &dataset.headers);
        files.insert(
            kind,
            UploadedFile {
                headers: dataset.headers.clone(),
                data: dataset.rows.clone(),
                row_count: dataset.row_count(),
                structure,
            },
        );
        state.store.put_dataset(&session_id, kind, dataset)?;
    }

    tracing::info!(session = %session_id, files = files.len(), "upload stored");

    Ok(Json(UploadResponse {
        success: true,
        session_id,
        files,
    }))
}
