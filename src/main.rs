//! Daily Report Viewer Server
//!
//! Run with: cargo run --bin daily-report [-- path/to/config.toml]
//!
//! # Configuration
//!
//! Reads the config file given as the first argument, or the first of the
//! default locations that exists. `DAILY_REPORT_*` environment variables
//! override file settings (see `daily-report-cli config`).
//! `RUST_LOG` overrides the configured log level.

use daily_report::api::{serve, AppState};
use daily_report::config::Config;
use daily_report::source::HttpSummarySource;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Config::load_with_env(&path)?,
        None => Config::load_default(),
    };

    daily_report::logging::init(&config.logging)?;

    tracing::info!("Starting daily report viewer v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Summary endpoint: {}", config.source.base_url);
    tracing::info!("Default channel: {}", config.source.default_channel);

    let source = Arc::new(HttpSummarySource::new(config.source.to_source_config()));
    let server = config.server.clone();

    serve(AppState::new(source, config), &server).await?;

    Ok(())
}
