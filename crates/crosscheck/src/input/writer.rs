//! CSV export of edited datasets.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{CrosscheckError, Result};
use crate::schema::Row;

/// Write `rows` as CSV with `headers` as the header row.
///
/// Cells are emitted in header order; a row lacking a column gets an empty
/// cell, and columns outside `headers` are dropped.
pub fn write_csv<W: Write>(rows: &[Row], headers: &[String], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(headers)?;
    for row in rows {
        csv_writer.write_record(
            headers
                .iter()
                .map(|h| row.get(h).map(|v| v.as_str()).unwrap_or("")),
        )?;
    }

    csv_writer.flush().map_err(|e| CrosscheckError::Csv(e.into()))?;
    Ok(())
}

/// Write `rows` to a CSV file at `path`, creating parent directories.
pub fn write_csv_file(rows: &[Row], headers: &[String], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| CrosscheckError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let file = File::create(path).map_err(|e| CrosscheckError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    write_csv(rows, headers, BufWriter::new(file))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote csv");
    Ok(())
}
