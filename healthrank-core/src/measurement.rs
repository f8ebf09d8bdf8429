//! The measurement capability the assigner works over.

use serde::{Deserialize, Serialize};

/// Anything that carries a numeric value and can receive a percentile.
///
/// The engine never creates or drops measurements; it only reads `value`
/// and writes the percentile back through `set_percentile`.
pub trait Measurement {
    fn value(&self) -> f64;

    /// Record the percentile fraction, in (0, 1), this measurement falls into.
    fn set_percentile(&mut self, percentile: f64);
}

/// A measurement with an opaque identity, e.g. a county FIPS code.
///
/// `percentile` stays `None` until the assigner places the point in a bucket.
/// Points above the largest computed threshold are left `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint<K> {
    pub key: K,
    pub value: f64,
    pub percentile: Option<f64>,
}

impl<K> DataPoint<K> {
    pub fn new(key: K, value: f64) -> Self {
        Self {
            key,
            value,
            percentile: None,
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.percentile.is_some()
    }
}

impl<K> Measurement for DataPoint<K> {
    fn value(&self) -> f64 {
        self.value
    }

    fn set_percentile(&mut self, percentile: f64) {
        self.percentile = Some(percentile);
    }
}

impl<M: Measurement + ?Sized> Measurement for &mut M {
    fn value(&self) -> f64 {
        (**self).value()
    }

    fn set_percentile(&mut self, percentile: f64) {
        (**self).set_percentile(percentile)
    }
}

/// Points the assigner could not place in any bucket.
pub fn unassigned<K>(points: &[DataPoint<K>]) -> Vec<&DataPoint<K>> {
    points.iter().filter(|p| !p.is_ranked()).collect()
}
