//! steam-appmanifest entry point.

mod app;
mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for listings and JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    let config = match &args.config {
        Some(path) => config::Config::load_from(path)?,
        None => config::Config::load()?,
    };
    tracing::debug!(?config, "configuration loaded");

    // Single-threaded runtime: the fetch is the only async step.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let report = rt.block_on(app::run(args, config))?;

    if !report.is_complete_success() {
        std::process::exit(1);
    }
    Ok(())
}
