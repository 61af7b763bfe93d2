//! Export command - write a dataset back out as a sanitized CSV.

use std::path::PathBuf;

use colored::Colorize;
use crosscheck::{validate_structure, write_csv_file, Crosscheck, DatasetKind};

pub fn run(
    file: PathBuf,
    kind: DatasetKind,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let crosscheck = Crosscheck::new();
    let loaded = crosscheck.load_file(&file, kind)?;
    let dataset = &loaded.dataset;

    let structure = validate_structure(&dataset.rows, &dataset.headers);
    if verbose {
        for issue in structure.errors.iter().chain(structure.warnings.iter()) {
            println!("  {} {}", "Note:".yellow(), issue.message);
        }
    }

    let output_path = output.unwrap_or_else(|| {
        let name = format!("{}_{}.csv", kind, chrono::Utc::now().timestamp_millis());
        file.with_file_name(name)
    });

    write_csv_file(&dataset.rows, &dataset.headers, &output_path)?;

    println!(
        "{} {} rows of {} to {}",
        "Exported".green().bold(),
        dataset.row_count().to_string().white().bold(),
        kind,
        output_path.display().to_string().white()
    );

    Ok(())
}
