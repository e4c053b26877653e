//! Configuration System
//!
//! Loads settings from a TOML file with `DAILY_REPORT_*` environment
//! variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::render::Locale;
use crate::source::SourceConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceSection,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote summaries endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Channel used when a request names none
    #[serde(default = "default_channel")]
    pub default_channel: String,
}

fn default_base_url() -> String {
    SourceConfig::default().base_url
}

fn default_channel() -> String {
    crate::model::DEFAULT_CHANNEL.to_string()
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_channel: default_channel(),
        }
    }
}

impl SourceSection {
    pub fn to_source_config(&self) -> SourceConfig {
        SourceConfig {
            base_url: self.base_url.clone(),
        }
    }
}

/// Viewer server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8091
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Embedded player settings
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    /// Hostname passed as `parent` to the embed player when the request
    /// carries no usable Host header
    #[serde(default = "default_embed_parent")]
    pub embed_parent: String,
}

fn default_embed_parent() -> String {
    "localhost".to_string()
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            embed_parent: default_embed_parent(),
        }
    }
}

/// Page presentation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewerConfig {
    /// Label language: `en` or `zh-TW`
    #[serde(default)]
    pub locale: Locale,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in Self::default_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_with_env(&path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {:?}", path);
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load config from {:?}: {}", path, e);
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Search order for [`Config::load_default`]
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("daily-report").join("config.toml")),
            Some(PathBuf::from("/etc/daily-report/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a variable lookup; unparsable ports and locales
    /// are ignored
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("DAILY_REPORT_SOURCE_URL") {
            self.source.base_url = url;
        }
        if let Some(channel) = lookup("DAILY_REPORT_CHANNEL") {
            self.source.default_channel = channel;
        }

        if let Some(host) = lookup("DAILY_REPORT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("DAILY_REPORT_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Some(parent) = lookup("DAILY_REPORT_EMBED_PARENT") {
            self.player.embed_parent = parent;
        }

        if let Some(locale) = lookup("DAILY_REPORT_LOCALE") {
            match Locale::parse(&locale) {
                Some(locale) => self.viewer.locale = locale,
                None => tracing::warn!(locale = %locale, "Ignoring unknown locale"),
            }
        }

        if let Some(level) = lookup("DAILY_REPORT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("DAILY_REPORT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Daily Report Viewer Configuration
#
# Environment variables override these settings:
# - DAILY_REPORT_SOURCE_URL
# - DAILY_REPORT_CHANNEL
# - DAILY_REPORT_HOST
# - DAILY_REPORT_PORT
# - DAILY_REPORT_EMBED_PARENT
# - DAILY_REPORT_LOCALE
# - DAILY_REPORT_LOG_LEVEL
# - DAILY_REPORT_LOG_FORMAT

[source]
# Summaries endpoint, queried as ?channel=<id>&action=all
base_url = "http://localhost:8090/summaries"

# Channel shown when none is requested
default_channel = "godjj"

[server]
# Viewer server host
host = "0.0.0.0"

# Viewer server port
port = 8091

# Allowed CORS origins (empty allows any)
cors_origins = []

[player]
# Fallback embed parent hostname
embed_parent = "localhost"

[viewer]
# Label language: en or zh-TW
locale = "en"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/daily-report/daily-report.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source.base_url, "http://localhost:8090/summaries");
        assert_eq!(config.source.default_channel, "godjj");
        assert_eq!(config.server.port, 8091);
        assert_eq!(config.player.embed_parent, "localhost");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.viewer.locale, Locale::En);
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = Config::parse(&generate_default_config()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.source.base_url, defaults.source.base_url);
        assert_eq!(config.server.host, defaults.server.host);
        assert_eq!(config.server.port, defaults.server.port);
        assert_eq!(config.player.embed_parent, defaults.player.embed_parent);
        assert_eq!(config.viewer.locale, defaults.viewer.locale);
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[source]\nbase_url = \"https://reports.example/api\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.source.base_url, "https://reports.example/api");
        assert_eq!(config.source.default_channel, "godjj");
        assert_eq!(config.server.port, 8091);
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/daily-report.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a number\"").unwrap();
        let bad = Config::load(file.path());
        assert!(matches!(bad, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("DAILY_REPORT_SOURCE_URL", "https://other.example/s"),
            ("DAILY_REPORT_PORT", "9000"),
            ("DAILY_REPORT_EMBED_PARENT", "reports.example"),
            ("DAILY_REPORT_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.source.base_url, "https://other.example/s");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.player.embed_parent, "reports.example");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_locale() {
        let config = Config::parse("[viewer]\nlocale = \"zh-TW\"").unwrap();
        assert_eq!(config.viewer.locale, Locale::ZhTw);

        assert!(Config::parse("[viewer]\nlocale = \"fr\"").is_err());

        let mut config = Config::default();
        config.apply_overrides(|key| (key == "DAILY_REPORT_LOCALE").then(|| "zh-tw".to_string()));
        assert_eq!(config.viewer.locale, Locale::ZhTw);

        config.apply_overrides(|key| (key == "DAILY_REPORT_LOCALE").then(|| "klingon".to_string()));
        assert_eq!(config.viewer.locale, Locale::ZhTw);
    }

    #[test]
    fn test_bad_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "DAILY_REPORT_PORT").then(|| "http".to_string()));
        assert_eq!(config.server.port, 8091);
    }
}
