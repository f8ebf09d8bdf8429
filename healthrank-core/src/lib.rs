//! HealthRank Core — percentile ranking for county health-indicator data sets.
//!
//! This crate contains the ranking engine behind the dashboard:
//! - Rank calculator for the exclusive (`PERCENTILE.EXC`) method
//! - Threshold tables with linear interpolation between order statistics
//! - Bucket assignment of a percentile to every measurement of a batch
//! - Distribution curve points for charting
//! - Parallel ranking of independent batches
//! - TOML ranking configuration
//!
//! No I/O happens on measurement data: callers hand in a mutable slice and
//! persist it themselves once the call returns.

pub mod assign;
pub mod batch;
pub mod config;
pub mod curve;
pub mod error;
pub mod measurement;
pub mod rank;
pub mod request;
pub mod thresholds;

pub use assign::assign_percentiles;
pub use batch::{BatchOutcome, BatchRanker};
pub use config::RankingConfig;
pub use curve::{percentile_curve, CurvePoint};
pub use error::{ConfigError, PercentileBoundsError};
pub use measurement::{unassigned, DataPoint, Measurement};
pub use rank::rank;
pub use request::{default_fractions, PercentileRequest, DEFAULT_RESOLUTION};
pub use thresholds::{compute_thresholds, percentile_value, Threshold, ThresholdTable};
