//! HTTP Summary Source
//!
//! Client for the remote summary endpoint. One request per fetch, no
//! retries and no timeout: a failed load is only recovered by reloading.

use async_trait::async_trait;
use reqwest::Client;

use super::{Summaries, SourceError, SummarySource};
use crate::model::{Channel, SummariesResponse};

/// Configuration for the HTTP source
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Endpoint base URL, queried with `?channel=…&action=all`
    pub base_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090/summaries".to_string(),
        }
    }
}

/// Summary endpoint client
pub struct HttpSummarySource {
    client: Client,
    config: SourceConfig,
}

impl HttpSummarySource {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Request URL for a channel
    pub fn request_url(&self, channel: &Channel) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let separator = if base.contains('?') { '&' } else { '?' };
        format!(
            "{}{}channel={}&action=all",
            base,
            separator,
            urlencoding::encode(channel.as_str())
        )
    }
}

#[async_trait]
impl SummarySource for HttpSummarySource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_all(&self, channel: &Channel) -> Result<Summaries, SourceError> {
        let url = self.request_url(channel);
        tracing::debug!(url = %url, "Fetching summaries");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        let payload: SummariesResponse = serde_json::from_str(&body)?;

        Summaries::from_response(payload)
    }
}
