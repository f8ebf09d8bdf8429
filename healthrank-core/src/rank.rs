//! Rank calculator for the exclusive percentile method.
//!
//! Implements the third variant of the percentile definition (the one NIST
//! recommends, equivalent to Excel's `PERCENTILE.EXC`). For a fraction `p`
//! and a sample of size `n`, the rank is `p * (n + 1)`, clamped to the first
//! element below `1 / (n + 1)` and to the last element above `n / (n + 1)`.

use crate::error::PercentileBoundsError;

/// Returns the 1-based rank at which the `p`-th percentile is found in an
/// ascending sample of `sample_size` values.
///
/// The rank may be fractional, meaning the percentile value lies between two
/// neighbouring order statistics and has to be interpolated.
///
/// With `sample_size == 0` the lower bound collapses to 1, so every valid
/// fraction returns rank 1. Callers must not use that rank as an index.
///
/// # Errors
/// `p` of exactly 0 or 1 is undefined under the exclusive method, and a
/// non-finite `p` has no rank.
///
/// # Example
/// ```
/// use healthrank_core::rank;
///
/// assert_eq!(rank(0.5, 4).unwrap(), 2.5);
/// assert_eq!(rank(0.01, 4).unwrap(), 1.0);
/// assert!(rank(1.0, 4).is_err());
/// ```
pub fn rank(p: f64, sample_size: usize) -> Result<f64, PercentileBoundsError> {
    if p == 0.0 || p == 1.0 {
        return Err(PercentileBoundsError::ExcludedFraction { fraction: p });
    }
    if !p.is_finite() {
        return Err(PercentileBoundsError::NonFiniteFraction { fraction: p });
    }

    let n = sample_size as f64;
    let lower_bound = 1.0 / (n + 1.0);
    let upper_bound = n / (n + 1.0);

    if p <= lower_bound {
        Ok(1.0)
    } else if p >= upper_bound {
        Ok(n)
    } else {
        Ok(p * (n + 1.0))
    }
}
