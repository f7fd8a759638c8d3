//! Configuration management for docsense.
//!
//! Settings come from a TOML file (explicit path, `./docsense.toml`, or the
//! user config directory) with `DOCSENSE_*` environment variables applied on
//! top. Every field has a default, so running without a config file works.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::DEFAULT_RESULTS_SUFFIX;
use crate::services::DEFAULT_MAX_FILE_BYTES;

/// Config file name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "docsense.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Remote endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL that endpoint paths are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upload endpoint path
    #[serde(default = "default_upload_path")]
    pub upload_path: String,
    /// Analysis endpoint path
    #[serde(default = "default_analysis_path")]
    pub analysis_path: String,
    /// Suffix appended to the upload location to find extraction results
    #[serde(default = "default_results_suffix")]
    pub results_suffix: String,
    /// Per-request timeout in seconds (unset = wait indefinitely)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Upload acceptance rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted file in bytes
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

/// Results polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Delay between polling attempts in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

/// Document viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Document shown in the viewer
    #[serde(default = "default_document_url")]
    pub document_url: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_upload_path() -> String {
    "/api/upload".to_string()
}

fn default_analysis_path() -> String {
    "/api/getDocumentData".to_string()
}

fn default_results_suffix() -> String {
    DEFAULT_RESULTS_SUFFIX.to_string()
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

fn default_interval_ms() -> u64 {
    5000
}

fn default_document_url() -> String {
    "https://document-reader.s3.us-east-2.amazonaws.com/sample.pdf".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            upload_path: default_upload_path(),
            analysis_path: default_analysis_path(),
            results_suffix: default_results_suffix(),
            timeout_secs: None,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            document_url: default_document_url(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    /// File this config was loaded from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration, discovering the file when no path is given.
    /// Environment overrides are always applied last.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(),
        };

        let config = match path {
            Some(path) => Self::load_from_path(&path).await?,
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        Ok(config.with_env_overrides())
    }

    /// Find the first existing config file in the standard locations.
    fn discover() -> Option<PathBuf> {
        let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("docsense").join("config.toml"));
        }
        candidates.into_iter().find(|p| p.is_file())
    }

    /// Load configuration from a specific TOML file.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded config from {}", path.display());
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `DOCSENSE_BASE_URL`: Base URL for the API endpoints
    /// - `DOCSENSE_UPLOAD_PATH`: Upload endpoint path
    /// - `DOCSENSE_ANALYSIS_PATH`: Analysis endpoint path
    /// - `DOCSENSE_TIMEOUT_SECS`: Per-request timeout
    /// - `DOCSENSE_MAX_FILE_BYTES`: Largest accepted file
    /// - `DOCSENSE_POLL_INTERVAL_MS`: Delay between polling attempts
    /// - `DOCSENSE_VIEWER_URL`: Document shown in the viewer
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup. Unparseable numbers are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("DOCSENSE_BASE_URL") {
            self.api.base_url = val;
        }
        if let Some(val) = lookup("DOCSENSE_UPLOAD_PATH") {
            self.api.upload_path = val;
        }
        if let Some(val) = lookup("DOCSENSE_ANALYSIS_PATH") {
            self.api.analysis_path = val;
        }
        if let Some(val) = lookup("DOCSENSE_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                self.api.timeout_secs = Some(n);
            }
        }
        if let Some(val) = lookup("DOCSENSE_MAX_FILE_BYTES") {
            if let Ok(n) = val.parse() {
                self.upload.max_file_bytes = n;
            }
        }
        if let Some(val) = lookup("DOCSENSE_POLL_INTERVAL_MS") {
            if let Ok(n) = val.parse() {
                self.poll.interval_ms = n;
            }
        }
        if let Some(val) = lookup("DOCSENSE_VIEWER_URL") {
            self.viewer.document_url = val;
        }
        self
    }

    /// Delay between polling attempts.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll.interval_ms)
    }

    /// Per-request timeout, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_secs.map(Duration::from_secs)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
