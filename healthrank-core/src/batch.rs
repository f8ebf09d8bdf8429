//! Ranking many independent data sets at once.
//!
//! An upload usually carries one data set per indicator. Each data set is
//! its own sample and is ranked on its own; nothing is shared between them,
//! so they can be ranked in parallel with Rayon.

use log::{debug, warn};
use rayon::prelude::*;

use crate::assign::assign_percentiles;
use crate::error::PercentileBoundsError;
use crate::measurement::Measurement;
use crate::request::PercentileRequest;

/// Outcome of one batch: `Ok` once its measurements have been assigned.
pub type BatchOutcome = Result<(), PercentileBoundsError>;

/// Ranks a list of independent batches with a shared request.
#[derive(Debug, Clone, Default)]
pub struct BatchRanker {
    request: PercentileRequest,
    serial: bool,
}

impl BatchRanker {
    /// Creates a ranker using `request` for every batch. Parallel by default.
    pub fn new(request: PercentileRequest) -> Self {
        Self {
            request,
            serial: false,
        }
    }

    /// Enables or disables parallel execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.serial = !parallel;
        self
    }

    pub fn request(&self) -> &PercentileRequest {
        &self.request
    }

    pub fn is_parallel(&self) -> bool {
        !self.serial
    }

    /// Assign percentiles within each batch.
    ///
    /// A failing batch does not stop the others; the returned outcomes line
    /// up with `batches` by index.
    pub fn rank_all<M>(&self, batches: &mut [Vec<M>]) -> Vec<BatchOutcome>
    where
        M: Measurement + Send,
    {
        debug!(
            "ranking {} batches ({} fractions, parallel: {})",
            batches.len(),
            self.request.len(),
            self.is_parallel()
        );

        let outcomes: Vec<BatchOutcome> = if self.is_parallel() {
            batches
                .par_iter_mut()
                .map(|batch| assign_percentiles(batch, Some(&self.request)))
                .collect()
        } else {
            batches
                .iter_mut()
                .map(|batch| assign_percentiles(batch, Some(&self.request)))
                .collect()
        };

        for (index, outcome) in outcomes.iter().enumerate() {
            if let Err(err) = outcome {
                warn!("batch {index} was not ranked: {err}");
            }
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::DataPoint;

    fn sample_batches() -> Vec<Vec<DataPoint<u32>>> {
        (0..8u32)
            .map(|b| {
                (0..200u32)
                    .map(|i| DataPoint::new(i, ((i * 7919 + b * 31) % 997) as f64))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn serial_and_parallel_agree() {
        let mut serial = sample_batches();
        let mut parallel = sample_batches();

        let request = PercentileRequest::with_resolution(100);
        let serial_out = BatchRanker::new(request.clone())
            .with_parallelism(false)
            .rank_all(&mut serial);
        let parallel_out = BatchRanker::new(request)
            .with_parallelism(true)
            .rank_all(&mut parallel);

        assert_eq!(serial_out, parallel_out);
        assert_eq!(serial, parallel);
    }

    #[test]
    fn failing_batch_does_not_stop_others() {
        let mut batches = vec![
            vec![DataPoint::new(0u32, 1.0), DataPoint::new(1, 2.0)],
            Vec::new(),
            vec![DataPoint::new(2u32, 5.0)],
        ];
        let outcomes = BatchRanker::default().rank_all(&mut batches);

        assert!(outcomes[0].is_ok());
        assert_eq!(outcomes[1], Err(PercentileBoundsError::EmptySample));
        assert!(outcomes[2].is_ok());
        assert!(batches[2][0].is_ranked());
    }

    #[test]
    fn default_ranker_is_parallel_with_default_request() {
        let ranker = BatchRanker::default();
        assert!(ranker.is_parallel());
        assert_eq!(ranker.request().len(), 999);
    }
}
