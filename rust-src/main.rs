//! Hospital DB Insights CLI
//!
//! Terminal dashboard and exports for the hospital database optimization results.

mod cli;
mod commands;
mod config;
mod dashboard;
mod data;
mod error;
mod format;
mod models;
mod visualization;

use tracing_subscriber::EnvFilter;


fn main() {
    // Logs go to stderr so stdout stays clean for `show` and `contact`
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
