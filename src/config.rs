//! Configuration: loads optional ~/.lunchpick/config.yaml.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::select::{DEFAULT_SPIN_FRAMES, DEFAULT_SPIN_INTERVAL_MS};
use crate::share::DEFAULT_MAP_SEARCH_BASE;
use crate::taste::{default_data_dir, DEFAULT_HISTORY_LIMIT};

/// Settings loaded from ~/.lunchpick/config.yaml. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Intermediate frames shown before the final pick.
    pub spin_frames: u32,
    /// Milliseconds between spin frames.
    pub spin_interval_ms: u64,
    /// Recent results kept in history, at most 5.
    pub history_limit: usize,
    /// Base URL for the map search link.
    pub map_search_base: String,
    /// Where preferences are stored. Defaults to ~/.lunchpick.
    pub data_dir: Option<PathBuf>,
    /// Default log level, overridden by RUST_LOG.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spin_frames: DEFAULT_SPIN_FRAMES,
            spin_interval_ms: DEFAULT_SPIN_INTERVAL_MS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            map_search_base: DEFAULT_MAP_SEARCH_BASE.to_string(),
            data_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Resolved data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn spin_interval(&self) -> Duration {
        Duration::from_millis(self.spin_interval_ms)
    }

    /// Load from `path`. A missing file gives defaults; an invalid one gives
    /// defaults and a warning.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };
        let config: Self = serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Self::default()
        });
        config.clamped()
    }

    /// Pull out-of-range values back into bounds.
    fn clamped(mut self) -> Self {
        let limit = self.history_limit.clamp(1, DEFAULT_HISTORY_LIMIT);
        if limit != self.history_limit {
            warn!(configured = self.history_limit, used = limit, "history_limit out of range");
            self.history_limit = limit;
        }
        self
    }

    /// Load from ~/.lunchpick/config.yaml.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }
}

/// Get the config file path.
pub fn config_path() -> PathBuf {
    default_data_dir().join("config.yaml")
}
