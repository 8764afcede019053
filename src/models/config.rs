//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Data source and request settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Snapshot persistence settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Report rendering settings
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.limit == 0 {
            return Err(AppError::validation("--limit must be > 0"));
        }
        if self.source.timeout_secs == 0 {
            return Err(AppError::validation("source.timeout_secs must be > 0"));
        }
        if self.source.user_agent.trim().is_empty() {
            return Err(AppError::validation("source.user_agent is empty"));
        }
        Url::parse(&self.source.base_url).map_err(|e| {
            AppError::validation(format!(
                "invalid base URL '{}': {}",
                self.source.base_url, e
            ))
        })?;
        if self.store.snapshot_path.as_os_str().is_empty() {
            return Err(AppError::validation("store.snapshot_path is empty"));
        }
        if self.report.max_preview_items == 0 {
            return Err(AppError::validation("report.max_preview_items must be > 0"));
        }
        Ok(())
    }
}

/// Data source request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Endpoint returning `{"results": [...]}`
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Free-text search passed through verbatim
    #[serde(default)]
    pub search: Option<String>,

    /// Maximum records per request
    #[serde(default = "defaults::limit")]
    pub limit: u32,

    /// Result offset
    #[serde(default)]
    pub skip: u64,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            search: None,
            limit: defaults::limit(),
            skip: 0,
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Snapshot persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Location of the snapshot document
    #[serde(default = "defaults::snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Whether to overwrite the snapshot at the end of a run
    #[serde(default = "defaults::save")]
    pub save: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: defaults::snapshot_path(),
            save: defaults::save(),
        }
    }
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Items listed per section before eliding the rest
    #[serde(default = "defaults::max_preview_items")]
    pub max_preview_items: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_preview_items: defaults::max_preview_items(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn base_url() -> String {
        "https://api.fda.gov/drug/shortages.json".into()
    }
    pub fn limit() -> u32 {
        100
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        concat!("shortage-tracker/", env!("CARGO_PKG_VERSION")).into()
    }

    pub fn snapshot_path() -> PathBuf {
        PathBuf::from("data/shortage_snapshot.json")
    }
    pub fn save() -> bool {
        true
    }

    pub fn max_preview_items() -> usize {
        crate::pipeline::DEFAULT_MAX_ITEMS
    }
}
