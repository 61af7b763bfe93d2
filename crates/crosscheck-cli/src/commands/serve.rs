//! Serve command - run the HTTP API.

use std::num::NonZeroU32;
use std::sync::Arc;

use colored::Colorize;
use crosscheck::{Crosscheck, CrosscheckConfig, MemorySessionStore};

use crate::server::{app, state::AppState};

pub fn run(
    host: String,
    port: u16,
    session_ttl_hours: i64,
    rate_limit: NonZeroU32,
) -> Result<(), Box<dyn std::error::Error>> {
    if session_ttl_hours <= 0 {
        return Err(format!("Session TTL must be positive, got {} hours", session_ttl_hours).into());
    }

    let config = CrosscheckConfig {
        session_ttl_hours,
        ..CrosscheckConfig::default()
    };
    let crosscheck = Crosscheck::with_config(config);
    let store = MemorySessionStore::with_ttl(crosscheck.config().session_ttl());
    let state = AppState::new(Arc::new(store), Arc::new(crosscheck)).with_rate_limit(rate_limit);

    let url = format!("http://{}:{}", host, port);
    println!();
    println!(
        "{} {}",
        "Starting crosscheck API at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Routes:   {}/api/csv", url);
    println!("  Sessions: expire after {} hours", session_ttl_hours);
    println!("  Limit:    {} requests per client every 15 minutes", rate_limit);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, &host, port))?;

    Ok(())
}
