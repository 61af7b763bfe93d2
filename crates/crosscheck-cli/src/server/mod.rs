//! HTTP API for uploading, editing, validating and exporting datasets.

pub mod app;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
