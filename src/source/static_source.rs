//! Static Summary Source
//!
//! Serves a fixed endpoint payload, loaded from JSON. Used for offline
//! rendering from a saved response and in tests.

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Summaries, SourceError, SummarySource};
use crate::model::{Channel, SummariesResponse};

/// Source that answers every channel with the same payload
pub struct StaticSource {
    response: SummariesResponse,
    fetches: AtomicUsize,
}

impl StaticSource {
    pub fn new(response: SummariesResponse) -> Self {
        Self {
            response,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Parse an endpoint payload
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a saved endpoint payload from disk
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|e| SourceError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Number of fetches served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SummarySource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_all(&self, channel: &Channel) -> Result<Summaries, SourceError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(channel = %channel, "Serving static summaries");
        Summaries::from_response(self.response.clone())
    }
}
