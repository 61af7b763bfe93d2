//! CSV input, sanitizing, and output.

mod parser;
mod sanitize;
mod source;
mod writer;

pub use parser::{Parser, ParserConfig};
pub use sanitize::{sanitize_json_rows, sanitize_rows, sanitize_value, JsonRow};
pub use source::{DataTable, SourceMetadata};
pub use writer::{write_csv, write_csv_file};
