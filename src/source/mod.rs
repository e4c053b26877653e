//! Summary Sources
//!
//! Where summary records come from. The viewer only talks to the
//! [`SummarySource`] trait; the HTTP client and a static JSON source
//! implement it.
//!
//! ## Endpoint contract
//!
//! `GET {base}?channel={id}&action=all` returns
//! `{ success, total, summaries: [...], detail? }`. A response with
//! `success: false` is a failure carrying `detail` as its message.

mod http;
mod static_source;

pub use http::{HttpSummarySource, SourceConfig};
pub use static_source::StaticSource;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::{Channel, SummariesResponse, SummaryRecord};

/// Message used when a failed payload carries no detail
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to load summaries";

/// Provider of all summary records for a channel
#[async_trait]
pub trait SummarySource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Fetch every summary for `channel`, newest first
    async fn fetch_all(&self, channel: &Channel) -> Result<Summaries, SourceError>;
}

/// A successful fetch
#[derive(Debug, Clone, PartialEq)]
pub struct Summaries {
    /// Day count reported by the endpoint
    pub total: u64,
    pub records: Vec<SummaryRecord>,
}

impl Summaries {
    /// Check the payload's success flag
    pub fn from_response(response: SummariesResponse) -> Result<Self, SourceError> {
        if !response.success {
            let detail = response
                .detail
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            return Err(SourceError::Rejected(detail));
        }

        Ok(Self {
            total: response.total,
            records: response.summaries,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Errors that can occur while loading summaries
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    /// The endpoint answered with `success: false`
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to read {path:?}: {error}")]
    Io { path: PathBuf, error: String },
}
