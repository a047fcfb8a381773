// src/infra/config.rs — Configuration loading (TOML)
//
// The backend base URL is intentionally absent: it is entered per session and
// never persisted.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout. Unset means the transport default (none).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Send `ngrok-skip-browser-warning` so tunnels skip their HTML interstitial.
    #[serde(default = "default_true")]
    pub skip_proxy_warning: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: None,
            skip_proxy_warning: true,
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub tick_rate_ms: u64,
    pub top_features: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            top_features: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file for dashboard mode (defaults to the data dir).
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn file_path(&self) -> PathBuf {
        self.file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(paths::log_file_path)
    }
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("roas-dash/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
