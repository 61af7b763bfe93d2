//! Cell normalization applied to every uploaded or edited row.

use indexmap::IndexMap;
use serde_json::Value;

use crate::schema::Row;

/// A row as received in a JSON body, before cells are coerced to text.
pub type JsonRow = IndexMap<String, Value>;

/// Trim a value and strip angle brackets.
pub fn sanitize_value(value: &str) -> String {
    value.trim().replace(['<', '>'], "")
}

/// Sanitize every cell of every row, keeping column order.
pub fn sanitize_rows(rows: &[Row]) -> Vec<Row> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|(k, v)| (k.clone(), sanitize_value(v)))
                .collect()
        })
        .collect()
}

/// Text form of a JSON cell: `null` becomes empty, strings are taken as-is,
/// anything else uses its JSON rendering.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce JSON cells to text, then sanitize as [`sanitize_rows`] does.
pub fn sanitize_json_rows(rows: &[JsonRow]) -> Vec<Row> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|(k, v)| (k.clone(), sanitize_value(&cell_text(v))))
                .collect()
        })
        .collect()
}
