//! Ranking configuration, stored as TOML.
//!
//! ```toml
//! resolution = 1000   # every tenth of a percent
//! parallel = true
//! # fractions = [0.1, 0.25, 0.5, 0.75, 0.9]   # overrides resolution
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::batch::BatchRanker;
use crate::error::ConfigError;
use crate::request::{PercentileRequest, DEFAULT_RESOLUTION};

/// How a deployment wants its batches ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Number of equal steps between 0 and 1; `resolution - 1` fractions are computed.
    pub resolution: u32,

    /// Explicit fractions. When present, `resolution` is ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fractions: Option<Vec<f64>>,

    /// Rank independent batches in parallel.
    pub parallel: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            fractions: None,
            parallel: true,
        }
    }
}

impl RankingConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the config to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The percentile request this config describes.
    pub fn request(&self) -> Result<PercentileRequest, ConfigError> {
        if let Some(fractions) = &self.fractions {
            return Ok(PercentileRequest::new(fractions.clone()));
        }
        if self.resolution < 2 {
            return Err(ConfigError::InvalidResolution(self.resolution));
        }
        Ok(PercentileRequest::with_resolution(self.resolution))
    }

    /// A batch ranker set up from this config.
    pub fn ranker(&self) -> Result<BatchRanker, ConfigError> {
        Ok(BatchRanker::new(self.request()?).with_parallelism(self.parallel))
    }
}
