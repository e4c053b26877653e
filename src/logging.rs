//! Logging Setup
//!
//! Installs the global `tracing` subscriber for the binaries. `RUST_LOG`
//! wins over the configured level; output goes to stderr (or the
//! configured file) so command output on stdout stays clean.

use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging setup errors
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to open log file {path}: {error}")]
    File { path: String, error: String },

    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(level: &str) -> String {
    format!("daily_report={},tower_http=debug", level)
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    tracing_subscriber::registry()
        .with(build_layer(config)?)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}

fn build_layer(config: &LoggingConfig) -> Result<BoxedLayer, LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&config.level)));

    let (writer, ansi) = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoggingError::File {
                    path: path.clone(),
                    error: e.to_string(),
                })?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let layer: BoxedLayer = match config.format.as_str() {
        "json" => fmt::layer()
            .json()
            .with_writer(writer)
            .with_filter(filter)
            .boxed(),
        _ => fmt::layer()
            .with_ansi(ansi)
            .with_writer(writer)
            .with_filter(filter)
            .boxed(),
    };

    Ok(layer)
}
