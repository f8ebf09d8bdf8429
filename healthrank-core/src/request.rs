//! Which percentiles to compute for a batch.

use std::borrow::Cow;
use std::sync::OnceLock;

/// Number of steps in the default request: every tenth of a percent.
pub const DEFAULT_RESOLUTION: u32 = 1000;

static DEFAULT_FRACTIONS: OnceLock<Vec<f64>> = OnceLock::new();

/// The default fractions `{0.001, 0.002, ..., 0.999}`.
///
/// Built on first use and shared for the rest of the process; it is never
/// mutated afterwards.
pub fn default_fractions() -> &'static [f64] {
    DEFAULT_FRACTIONS.get_or_init(|| stepped_fractions(DEFAULT_RESOLUTION))
}

/// `{1/steps, 2/steps, ..., (steps-1)/steps}`. Empty for `steps < 2`.
fn stepped_fractions(steps: u32) -> Vec<f64> {
    (1..steps).map(|i| i as f64 / steps as f64).collect()
}

/// A set of percentile fractions to compute, each expected strictly inside
/// (0, 1).
///
/// The order is kept as given: threshold tables come back in request order.
/// Fractions are not validated here; 0, 1 and non-finite values are reported
/// when the table is computed.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileRequest {
    fractions: Cow<'static, [f64]>,
}

impl PercentileRequest {
    /// Request an explicit list of fractions.
    pub fn new(fractions: Vec<f64>) -> Self {
        Self {
            fractions: Cow::Owned(fractions),
        }
    }

    /// Request every `1/steps` step strictly between 0 and 1.
    ///
    /// `with_resolution(100)` asks for the 1st through 99th percentile.
    pub fn with_resolution(steps: u32) -> Self {
        if steps == DEFAULT_RESOLUTION {
            return Self::default();
        }
        Self::new(stepped_fractions(steps))
    }

    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }
}

impl Default for PercentileRequest {
    fn default() -> Self {
        Self {
            fractions: Cow::Borrowed(default_fractions()),
        }
    }
}

impl From<Vec<f64>> for PercentileRequest {
    fn from(fractions: Vec<f64>) -> Self {
        Self::new(fractions)
    }
}
