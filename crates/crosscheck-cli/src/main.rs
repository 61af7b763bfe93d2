//! Crosscheck CLI - validate and correct classification references in CSV data.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Validate {
            strings,
            classifications,
            json,
            output,
        } => commands::validate::run(strings, classifications, json, output, cli.verbose),

        Commands::Export { file, kind, output } => {
            commands::export::run(file, kind, output, cli.verbose)
        }

        Commands::Serve {
            port,
            host,
            session_ttl_hours,
            rate_limit,
        } => commands::serve::run(host, port, session_ttl_hours, rate_limit),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, honouring `RUST_LOG` when set.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "crosscheck=debug,tower_http=debug"
    } else {
        "crosscheck=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
