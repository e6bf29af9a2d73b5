//! GeoPin CLI - Terminal map session
//!
//! The terminal stands in for the map surface: clicks are typed as
//! coordinates, and results and notifications are printed.

mod cli;
mod command;
mod output;
mod presenter;
mod session;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // Initialize tracing on stderr so it does not interleave with session output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Single-threaded runtime: all interaction state lives on one task
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    runtime.block_on(session::run(cli))?;

    Ok(())
}
