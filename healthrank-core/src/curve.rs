//! Distribution curve for charting.
//!
//! Charts draw the percentile distribution of a data set as a spline behind
//! the highlighted counties: x is the percentile in percent, y the value at
//! that percentile.

use serde::{Deserialize, Serialize};

use crate::error::PercentileBoundsError;
use crate::request::PercentileRequest;
use crate::thresholds::compute_thresholds;

/// One point of the distribution curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Percentile expressed in percent, e.g. 25.0 for the 25th percentile.
    pub percent: f64,
    pub value: f64,
}

/// Build the distribution curve of `values` at the fractions in `request`.
///
/// Points are ordered by ascending percent whatever order the request uses.
pub fn percentile_curve(
    values: &[f64],
    request: &PercentileRequest,
) -> Result<Vec<CurvePoint>, PercentileBoundsError> {
    let table = compute_thresholds(values, request.fractions())?;

    let mut points: Vec<CurvePoint> = table
        .iter()
        .map(|t| CurvePoint {
            percent: t.fraction * 100.0,
            value: t.value,
        })
        .collect();
    points.sort_by(|a, b| a.percent.total_cmp(&b.percent));
    Ok(points)
}
