//! Application State
//!
//! Shared state accessible by all handlers. Requests only read it; every
//! page load builds its own view controller.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::source::SummarySource;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Where summaries are fetched from
    pub source: Arc<dyn SummarySource>,
    pub config: Arc<Config>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(source: Arc<dyn SummarySource>, config: Config) -> Self {
        Self {
            source,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Embed parent for a request: the Host header without its port, or the
    /// configured fallback
    pub fn embed_parent(&self, host: Option<&str>) -> String {
        host.map(strip_port)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.config.player.embed_parent.clone())
    }
}

fn strip_port(host: &str) -> &str {
    let host = host.trim();
    // [::1]:8091
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or_default();
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;

    fn state() -> AppState {
        let source = StaticSource::from_json(r#"{"success": true}"#).unwrap();
        AppState::new(Arc::new(source), Config::default())
    }

    #[test]
    fn test_embed_parent_from_host() {
        let state = state();
        assert_eq!(state.embed_parent(Some("reports.example:8091")), "reports.example");
        assert_eq!(state.embed_parent(Some("reports.example")), "reports.example");
        assert_eq!(state.embed_parent(Some("[::1]:8091")), "::1");
    }

    #[test]
    fn test_embed_parent_fallback() {
        let state = state();
        assert_eq!(state.embed_parent(None), "localhost");
        assert_eq!(state.embed_parent(Some("  ")), "localhost");
    }
}
