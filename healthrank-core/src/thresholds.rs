//! Threshold tables: percentile values for one sample.
//!
//! A threshold is the interpolated sample value at a requested fraction.
//! Tables are computed all-or-nothing: the first bad fraction aborts the
//! whole table.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::PercentileBoundsError;
use crate::rank::rank;

/// One `(fraction, value)` pair of a threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub fraction: f64,
    pub value: f64,
}

/// Percentile values for one sample, in the order the fractions were requested.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThresholdTable {
    entries: Vec<Threshold>,
}

impl ThresholdTable {
    pub fn entries(&self) -> &[Threshold] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Threshold> {
        self.entries.iter()
    }

    /// The table as plain `(fraction, value)` tuples.
    pub fn to_pairs(&self) -> Vec<(f64, f64)> {
        self.entries.iter().map(|t| (t.fraction, t.value)).collect()
    }
}

impl<'a> IntoIterator for &'a ThresholdTable {
    type Item = &'a Threshold;
    type IntoIter = std::slice::Iter<'a, Threshold>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The exclusive-method percentile value for `p` in `values`.
///
/// An unsorted slice is copied and sorted first. To compute many fractions
/// over one sample, use [`compute_thresholds`], which sorts once.
///
/// # Errors
/// `EmptySample` for an empty slice, otherwise whatever [`rank`] rejects.
pub fn percentile_value(p: f64, values: &[f64]) -> Result<f64, PercentileBoundsError> {
    interpolate(p, &ascending(values))
}

/// Ranks are 1-based; the value is interpolated between the two order
/// statistics around the rank, except when the rank lands on the last
/// element where there is nothing to interpolate against.
///
/// `sorted` must be ascending.
fn interpolate(p: f64, sorted: &[f64]) -> Result<f64, PercentileBoundsError> {
    debug_assert!(is_ascending(sorted));
    let sample_size = sorted.len();
    if sample_size == 0 {
        return Err(PercentileBoundsError::EmptySample);
    }

    let x = rank(p, sample_size)?;
    // rank() is at least 1 for a non-empty sample.
    let index = x.floor() as usize - 1;
    let fraction = x % 1.0;

    if x >= sample_size as f64 {
        return Ok(sorted[index]);
    }

    let lower = sorted[index];
    let upper = sorted[index + 1];
    Ok(lower + fraction * (upper - lower))
}

/// Compute the threshold table of `values` for each of `fractions`.
///
/// `values` need not be sorted: an unsorted input is copied and sorted
/// ascending first. The result has one entry per fraction, in the order
/// given.
///
/// # Example
/// ```
/// use healthrank_core::compute_thresholds;
///
/// let table = compute_thresholds(&[10.0, 20.0, 30.0, 40.0], &[0.25, 0.5, 0.75]).unwrap();
/// assert_eq!(table.to_pairs(), vec![(0.25, 12.5), (0.5, 25.0), (0.75, 37.5)]);
/// ```
///
/// # Errors
/// `EmptySample` when `values` is empty, regardless of the fractions; a
/// fraction of 0, 1 or a non-finite fraction fails the whole table.
pub fn compute_thresholds(
    values: &[f64],
    fractions: &[f64],
) -> Result<ThresholdTable, PercentileBoundsError> {
    if values.is_empty() {
        return Err(PercentileBoundsError::EmptySample);
    }

    let sorted = ascending(values);
    let entries = fractions
        .iter()
        .map(|&fraction| {
            interpolate(fraction, &sorted).map(|value| Threshold { fraction, value })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ThresholdTable { entries })
}

/// Borrow `values` when already ascending, otherwise sort a copy.
fn ascending(values: &[f64]) -> Cow<'_, [f64]> {
    if is_ascending(values) {
        Cow::Borrowed(values)
    } else {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Cow::Owned(sorted)
    }
}

fn is_ascending(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0].total_cmp(&w[1]).is_le())
}
