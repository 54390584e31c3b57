//! Configuration for the middleware.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tsmw_core::DEFAULT_GATED_PREFIX;
use tsmw_mechanics::TargetClamp;

use crate::error::{MiddlewareError, MiddlewareResult};

/// Middleware settings. Every field has a default, so a TOML file only needs
/// the keys it changes:
///
/// ```toml
/// world_file = "campaign/world.json"
/// log_level = "debug"
/// target_clamp = "percentile"
/// seed = 7
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiddlewareConfig {
    /// The world bible. Relative paths resolve against the working directory.
    pub world_file: PathBuf,
    /// Log filter (`silent`, `error`, `warn`, `info`, `debug`, `trace`, or
    /// any `tracing` filter directive).
    pub log_level: String,
    /// Namespace that `[SET ...]` may write into.
    pub gated_prefix: String,
    /// How computed targets are bounded.
    pub target_clamp: TargetClamp,
    /// RNG seed for reproducible rolls; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            world_file: PathBuf::from("world.json"),
            log_level: "info".to_string(),
            gated_prefix: DEFAULT_GATED_PREFIX.to_string(),
            target_clamp: TargetClamp::default(),
            seed: None,
        }
    }
}

impl MiddlewareConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> MiddlewareResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| MiddlewareError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|e| MiddlewareError::ConfigParse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Set the world file.
    pub fn with_world_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.world_file = path.into();
        self
    }

    /// Set the log filter.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the gated namespace prefix.
    pub fn with_gated_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.gated_prefix = prefix.into();
        self
    }

    /// Set the target clamp policy.
    pub fn with_target_clamp(mut self, clamp: TargetClamp) -> Self {
        self.target_clamp = clamp;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The world file as an absolute path.
    pub fn world_path(&self) -> PathBuf {
        if self.world_file.is_absolute() {
            return self.world_file.clone();
        }
        std::env::current_dir()
            .map(|cwd| cwd.join(&self.world_file))
            .unwrap_or_else(|_| self.world_file.clone())
    }

    /// The log level as a `tracing` filter directive.
    pub fn tracing_filter(&self) -> String {
        match self.log_level.trim() {
            "silent" | "" => "off".to_string(),
            other => other.to_string(),
        }
    }
}
