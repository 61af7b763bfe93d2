//! Error types for the crosscheck library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for crosscheck operations.
///
/// Per-row data problems are never reported through this type; they are
/// collected as [`Issue`](crate::validation::Issue)s inside a report.
#[derive(Debug, Error)]
pub enum CrosscheckError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no columns to work with.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// One of the row sets required for validation was not supplied.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Uploaded file does not carry the columns its dataset kind requires.
    #[error("Invalid headers for {kind}. Missing: {}", missing.join(", "))]
    InvalidHeaders { kind: String, missing: Vec<String> },

    /// Dataset kind string not recognised.
    #[error("Unknown dataset kind: {0}")]
    UnknownDatasetKind(String),

    /// No session with the given id.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Session exists but holds no dataset of the requested kind.
    #[error("{kind} data not found in session {session}")]
    DatasetNotFound { session: String, kind: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for crosscheck operations.
pub type Result<T> = std::result::Result<T, CrosscheckError>;
