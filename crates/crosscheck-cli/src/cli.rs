//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use crosscheck::DatasetKind;
use std::num::NonZeroU32;
use std::path::PathBuf;

/// Crosscheck: validate fact rows against a classification table
#[derive(Parser)]
#[command(name = "crosscheck")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a strings file against a classifications file
    Validate {
        /// Path to the strings CSV
        #[arg(value_name = "STRINGS")]
        strings: PathBuf,

        /// Path to the classifications CSV
        #[arg(value_name = "CLASSIFICATIONS")]
        classifications: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Also write the JSON result to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-write a dataset as a sanitized CSV
    Export {
        /// Path to the dataset file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Dataset kind (strings or classifications)
        #[arg(short, long)]
        kind: DatasetKind,

        /// Output path (default: <kind>_<millis>.csv next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000", env = "CROSSCHECK_PORT")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1", env = "CROSSCHECK_HOST")]
        host: String,

        /// Hours an uploaded session stays alive
        #[arg(long, default_value = "24", env = "CROSSCHECK_SESSION_TTL_HOURS")]
        session_ttl_hours: i64,

        /// API requests allowed per client every 15 minutes
        #[arg(long, default_value = "1000", env = "CROSSCHECK_RATE_LIMIT")]
        rate_limit: NonZeroU32,
    },
}
