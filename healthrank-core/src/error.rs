//! Error types for the ranking engine.

use thiserror::Error;

/// The one failure kind of the ranking engine.
///
/// Raised when a percentile cannot be computed at all: the sample is empty,
/// or the requested fraction sits outside what the exclusive method defines.
/// Every other anomaly (tiny samples, fractions near the ends) is resolved by
/// clamping the rank instead.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PercentileBoundsError {
    #[error("cannot calculate a percentile with no values")]
    EmptySample,

    #[error("cannot calculate percentile rank for p = 0 or p = 1 (was {fraction})")]
    ExcludedFraction { fraction: f64 },

    #[error("percentile fraction must be a finite number (was {fraction})")]
    NonFiniteFraction { fraction: f64 },
}

/// Errors from loading or interpreting a [`RankingConfig`](crate::config::RankingConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("resolution must be at least 2 steps (was {0})")]
    InvalidResolution(u32),
}
