//! # Configuration
//!
//! Configuration is managed by [`confique`], layered in priority order:
//! 1. **Environment variables**: `INFRAPIPE_DATASET_MAX_ATTEMPTS`, etc.
//! 2. **Config file**: an explicit path, else `infrapipe.toml` in the OS config
//!    directory (via `directories`). A missing file is skipped.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_url` | Fulcrum share | Where the pipeline GeoJSON is published |
//! | `dataset_poll_interval_ms` | `500` | Delay between dataset readiness probes |
//! | `dataset_max_attempts` | `50` | Probes before filter initialization gives up |
//! | `surface_retry_ms` | `100` | Delay between render-surface retries (no ceiling) |
//! | `search_min_query_len` | `3` | Shortest query that produces suggestions |
//! | `search_limit` | `6` | Maximum number of suggestions |

use crate::error::Result;
use crate::readiness::RetryPolicy;
use crate::search::SearchOptions;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DATA_URL: &str = "https://web.fulcrumapp.com/shares/0107845e48091efd.geojson";

pub const CONFIG_FILE_NAME: &str = "infrapipe.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InfraConfig {
    /// Published location of the infrastructure pipeline GeoJSON
    #[config(
        default = "https://web.fulcrumapp.com/shares/0107845e48091efd.geojson",
        env = "INFRAPIPE_DATA_URL"
    )]
    pub data_url: String,

    /// Milliseconds between dataset readiness probes
    #[config(default = 500, env = "INFRAPIPE_DATASET_POLL_INTERVAL_MS")]
    pub dataset_poll_interval_ms: u64,

    /// Dataset probes before filter initialization gives up
    #[config(default = 50, env = "INFRAPIPE_DATASET_MAX_ATTEMPTS")]
    pub dataset_max_attempts: u32,

    /// Milliseconds between render-surface retries
    #[config(default = 100, env = "INFRAPIPE_SURFACE_RETRY_MS")]
    pub surface_retry_ms: u64,

    /// Shortest search query that yields suggestions
    #[config(default = 3, env = "INFRAPIPE_SEARCH_MIN_QUERY_LEN")]
    pub search_min_query_len: usize,

    /// Maximum number of search suggestions
    #[config(default = 6, env = "INFRAPIPE_SEARCH_LIMIT")]
    pub search_limit: usize,
}

impl Default for InfraConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            dataset_poll_interval_ms: 500,
            dataset_max_attempts: 50,
            surface_retry_ms: 100,
            search_min_query_len: 3,
            search_limit: 6,
        }
    }
}

impl InfraConfig {
    /// Load from the environment, `path` (or the default location) and defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(file) = path.map(Path::to_path_buf).or_else(default_config_path) {
            builder = builder.file(file);
        }
        Ok(builder.load()?)
    }

    /// Bounded policy for waiting on the dataset.
    pub fn dataset_policy(&self) -> RetryPolicy {
        RetryPolicy::bounded(
            Duration::from_millis(self.dataset_poll_interval_ms),
            self.dataset_max_attempts,
        )
    }

    /// Unbounded policy for waiting on the render surface.
    pub fn surface_policy(&self) -> RetryPolicy {
        RetryPolicy::unbounded(Duration::from_millis(self.surface_retry_ms))
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            min_query_len: self.search_min_query_len,
            limit: self.search_limit,
        }
    }
}

/// `infrapipe.toml` in the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "infrapipe")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = InfraConfig::default();
        assert_eq!(config.data_url, DEFAULT_DATA_URL);
        assert_eq!(config.dataset_max_attempts, 50);
        assert_eq!(config.search_limit, 6);
    }

    #[test]
    fn test_dataset_policy_is_bounded() {
        let policy = InfraConfig::default().dataset_policy();
        assert_eq!(policy.interval, Duration::from_millis(500));
        assert_eq!(policy.max_attempts, Some(50));
    }

    #[test]
    fn test_surface_policy_is_unbounded() {
        let policy = InfraConfig::default().surface_policy();
        assert_eq!(policy.interval, Duration::from_millis(100));
        assert_eq!(policy.max_attempts, None);
    }

    #[test]
    fn test_search_options_from_config() {
        let config = InfraConfig {
            search_limit: 10,
            ..Default::default()
        };
        let options = config.search_options();
        assert_eq!(options.limit, 10);
        assert_eq!(options.min_query_len, 3);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = InfraConfig {
            dataset_max_attempts: 5,
            ..Default::default()
        };
        let text = toml::to_string(&config).unwrap();
        let parsed: InfraConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "surface_retry_ms = 250\nsearch_limit = 2\n").unwrap();

        let config = InfraConfig::load(Some(&path)).unwrap();
        assert_eq!(config.surface_retry_ms, 250);
        assert_eq!(config.search_limit, 2);
        assert_eq!(config.dataset_poll_interval_ms, 500);
    }

    #[test]
    fn test_load_with_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = InfraConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.dataset_max_attempts, InfraConfig::default().dataset_max_attempts);
    }
}
