//! Client configuration.
//!
//! Serialized to TOML and stored in the user's config directory. Missing
//! files and missing fields fall back to defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use gitconnect_api::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

use crate::error::{FeedError, Result};

/// Default interval between session store polls.
pub const DEFAULT_SESSION_POLL_MS: u64 = 500;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// How concurrent reaction responses for the same post are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileOrder {
    /// The last response to arrive wins, whatever order requests were sent in.
    #[default]
    ArrivalOrder,
    /// Responses older than the last applied one (by send order) are dropped.
    RequestOrder,
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root URL.
    pub base_url: String,

    /// Session store polling interval in milliseconds.
    pub session_poll_interval_ms: u64,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Reaction reconciliation strategy.
    pub reconcile_order: ReconcileOrder,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_poll_interval_ms: DEFAULT_SESSION_POLL_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            reconcile_order: ReconcileOrder::default(),
        }
    }
}

impl ClientConfig {
    /// Load the config from the default path, falling back to defaults.
    pub fn load() -> Self {
        let path = Self::config_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Using default configuration: {}", err);
                Self::default()
            }
        }
    }

    /// Load the config from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(FeedError::Store {
                    operation: "read",
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|e| FeedError::StoreFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save the config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| FeedError::StoreFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        crate::store::write_atomic(path, content.as_bytes())
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "GitConnect", "gitconnect")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("gitconnect.toml"))
    }

    /// Replace the API root URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Session polling interval. A zero setting falls back to the default.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        match self.session_poll_interval_ms {
            0 => Duration::from_millis(DEFAULT_SESSION_POLL_MS),
            ms => Duration::from_millis(ms),
        }
    }

    /// Per-request timeout. A zero setting falls back to the default.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_secs {
            0 => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.reconcile_order, ReconcileOrder::ArrivalOrder);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = ClientConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "reconcile_order = \"request_order\"\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.reconcile_order, ReconcileOrder::RequestOrder);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = ClientConfig {
            session_poll_interval_ms: 250,
            ..ClientConfig::default()
        }
        .with_base_url("http://localhost:8080/api");

        config.save_to(&path).unwrap();
        assert_eq!(ClientConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_zero_intervals_fall_back() {
        let config = ClientConfig {
            session_poll_interval_ms: 0,
            request_timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(DEFAULT_SESSION_POLL_MS));
        assert_eq!(config.request_timeout(), Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "session_poll_interval_ms = \"soon\"\n").unwrap();
        assert!(matches!(
            ClientConfig::load_from(&path),
            Err(FeedError::StoreFormat { .. })
        ));
    }
}
