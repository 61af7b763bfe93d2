//! Fuzz target for the data parser.
//!
//! The CSV/TSV parser must never panic on malformed input, whatever the
//! detected delimiter.

#![no_main]

use crosscheck::{DatasetKind, Parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    if let Ok((table, _source)) = parser.parse_named(data, "fuzz.csv") {
        let rows = table.to_rows();
        let _ = crosscheck::check_headers(&table.headers, DatasetKind::Strings);
        let _ = crosscheck::sanitize_rows(&rows);
    }
});
