//! Validate command - check a strings file against a classifications file.

use std::path::{Path, PathBuf};

use colored::Colorize;
use crosscheck::{CheckResult, Crosscheck, IssueKind, ValidationReport};

/// Errors listed before the output is cut short (all are listed with -v).
const MAX_LISTED_ERRORS: usize = 20;

pub fn run(
    strings: PathBuf,
    classifications: PathBuf,
    json_output: bool,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for path in [&strings, &classifications] {
        if !path.exists() {
            return Err(format!("File not found: {}", path.display()).into());
        }
    }

    let crosscheck = Crosscheck::new();
    let result = crosscheck.check_files(&strings, &classifications)?;

    if let Some(ref path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&result)?)?;
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&strings, &classifications, &result, verbose);
        if let Some(path) = output {
            println!();
            println!(
                "{} {}",
                "Saved to".green().bold(),
                path.display().to_string().white()
            );
        }
    }

    if result.report.is_valid {
        Ok(())
    } else {
        Err(format!(
            "{} of {} rows failed validation",
            result.report.stats.invalid_count, result.report.stats.fact_count
        )
        .into())
    }
}

fn print_report(
    strings: &Path,
    classifications: &Path,
    result: &CheckResult,
    verbose: bool,
) {
    let report = &result.report;

    println!(
        "{} {} {} {}",
        "Checking".cyan().bold(),
        strings.display().to_string().white(),
        "against".cyan().bold(),
        classifications.display().to_string().white()
    );
    println!();
    println!(
        "Rows: {} facts, {} classifications ({} distinct combinations)",
        report.stats.fact_count.to_string().white().bold(),
        report.stats.reference_count,
        report.stats.index_size
    );
    println!(
        "Found {} errors, {} warnings",
        report.errors.len().to_string().red(),
        report.warnings.len().to_string().yellow()
    );

    let counts = kind_counts(report);
    if verbose && !counts.is_empty() {
        println!();
        println!("{}", "By kind:".yellow().bold());
        for (label, count) in counts {
            println!("  {:28} {}", label, count);
        }
    }

    if !report.errors.is_empty() {
        println!();
        println!("{}", "Errors:".red().bold());
        let limit = if verbose {
            report.errors.len()
        } else {
            MAX_LISTED_ERRORS
        };
        for issue in report.errors.iter().take(limit) {
            println!("  {}", issue.message);
        }
        if report.errors.len() > limit {
            println!("  ... and {} more (use -v to list all)", report.errors.len() - limit);
        }
    }

    if verbose && !report.warnings.is_empty() {
        println!();
        println!("{}", "Warnings:".yellow().bold());
        for issue in &report.warnings {
            println!("  {}", issue.message);
        }
    }

    if !result.suggestions.is_empty() {
        println!();
        println!("{}", "Suggested corrections:".yellow().bold());
        for suggestion in &result.suggestions {
            println!(
                "  Row {} {}",
                suggestion.for_row_number,
                suggestion.invalid_key.to_string().red()
            );
            if suggestion.ranked.is_empty() {
                println!("    {}", "no similar combination".dimmed());
            }
            for candidate in &suggestion.ranked {
                println!(
                    "    {} {}",
                    format!("[{}]", candidate.score).cyan(),
                    candidate.candidate.to_string().green()
                );
            }
        }
    }

    println!();
    if report.is_valid {
        println!("{}", result.summary.recommendation.green().bold());
    } else {
        println!("{}", result.summary.recommendation.yellow());
    }
}

/// Labelled issue counts, skipping kinds that did not occur.
fn kind_counts(report: &ValidationReport) -> Vec<(&'static str, usize)> {
    IssueKind::ALL
        .iter()
        .map(|kind| (kind.label(), report.count(*kind)))
        .filter(|(_, count)| *count > 0)
        .collect()
}
