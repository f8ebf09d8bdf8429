//! Bucket assignment: tag every measurement of a batch with its percentile.
//!
//! The batch is sorted once, a threshold table is built from the sorted
//! values, and a single cursor walk over both assigns each measurement the
//! smallest requested fraction whose threshold is not below its value.

use log::debug;

use crate::error::PercentileBoundsError;
use crate::measurement::Measurement;
use crate::request::{default_fractions, PercentileRequest};
use crate::thresholds::{compute_thresholds, Threshold, ThresholdTable};

/// Assign a percentile to every measurement in `measurements`.
///
/// The slice is reordered ascending by value (stable, so equal values keep
/// their input order). When `request` is `None` or holds no fractions, the
/// 999 tenth-of-a-percent fractions are used.
///
/// Measurements whose value exceeds every computed threshold are left
/// untouched. That can happen because the thresholds only cover the
/// requested fractions, not the sample maximum; callers who need to know
/// inspect which measurements received no percentile.
///
/// # Errors
/// `EmptySample` for an empty batch, or a bad fraction in `request`. On
/// error the slice is left exactly as it was passed in.
///
/// # Example
/// ```
/// use healthrank_core::{assign_percentiles, DataPoint, PercentileRequest};
///
/// let mut points = vec![
///     DataPoint::new("b", 40.0),
///     DataPoint::new("a", 10.0),
/// ];
/// let request = PercentileRequest::new(vec![0.5, 0.9]);
/// assign_percentiles(&mut points, Some(&request)).unwrap();
///
/// assert_eq!(points[0].key, "a");
/// assert_eq!(points[0].percentile, Some(0.5));
/// assert_eq!(points[1].percentile, Some(0.9));
/// ```
pub fn assign_percentiles<M: Measurement>(
    measurements: &mut [M],
    request: Option<&PercentileRequest>,
) -> Result<(), PercentileBoundsError> {
    let fractions = match request {
        Some(request) if !request.is_empty() => request.fractions(),
        _ => default_fractions(),
    };

    let mut values: Vec<f64> = measurements.iter().map(Measurement::value).collect();
    values.sort_by(f64::total_cmp);
    let table = compute_thresholds(&values, fractions)?;

    measurements.sort_by(|a, b| a.value().total_cmp(&b.value()));
    let assigned = assign_sorted(measurements, &table);

    debug!(
        "assigned percentiles to {assigned} of {} measurements using {} thresholds",
        measurements.len(),
        table.len()
    );
    if assigned < measurements.len() {
        debug!(
            "{} measurements above the largest threshold ({:?}) left unassigned",
            measurements.len() - assigned,
            table.iter().map(|t| t.value).reduce(f64::max)
        );
    }

    Ok(())
}

/// Walk ascending `measurements` against `table`, returning how many were
/// assigned before the thresholds ran out.
fn assign_sorted<M: Measurement>(measurements: &mut [M], table: &ThresholdTable) -> usize {
    // The walk needs thresholds in fraction order; requests may come in any order.
    let mut buckets: Vec<Threshold> = table.entries().to_vec();
    buckets.sort_by(|a, b| a.fraction.total_cmp(&b.fraction));

    let mut cursor = 0;
    for (i, measurement) in measurements.iter_mut().enumerate() {
        let value = measurement.value();
        while cursor < buckets.len() && buckets[cursor].value < value {
            cursor += 1;
        }
        if cursor == buckets.len() {
            return i;
        }
        measurement.set_percentile(buckets[cursor].fraction);
    }
    measurements.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::{unassigned, DataPoint};

    fn points(values: &[f64]) -> Vec<DataPoint<usize>> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| DataPoint::new(i, v))
            .collect()
    }

    #[test]
    fn unsorted_batch_is_sorted_and_ranked_in_order() {
        let mut batch = points(&[40.0, 10.0, 30.0, 20.0]);
        assign_percentiles(&mut batch, None).unwrap();

        let values: Vec<f64> = batch.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0, 40.0]);

        let ranks: Vec<f64> = batch.iter().map(|p| p.percentile.unwrap()).collect();
        assert!(
            ranks.windows(2).all(|w| w[0] < w[1]),
            "percentiles should rise strictly with value: {ranks:?}"
        );
    }

    #[test]
    fn explicit_request_buckets_by_threshold() {
        // Thresholds for 0.25/0.5/0.75 are 12.5/25/37.5.
        let mut batch = points(&[10.0, 20.0, 30.0, 40.0]);
        let request = PercentileRequest::new(vec![0.25, 0.5, 0.75]);
        assign_percentiles(&mut batch, Some(&request)).unwrap();

        assert_eq!(batch[0].percentile, Some(0.25));
        assert_eq!(batch[1].percentile, Some(0.5));
        assert_eq!(batch[2].percentile, Some(0.75));
        // 40 is above the 75th percentile threshold: no bucket left.
        assert_eq!(batch[3].percentile, None);
    }

    #[test]
    fn values_above_largest_threshold_stay_unassigned() {
        let mut batch = points(&[500.0, 1.0, 2.0, 3.0, 1000.0]);
        let request = PercentileRequest::new(vec![0.1, 0.5]);
        assign_percentiles(&mut batch, Some(&request)).unwrap();

        let gap = unassigned(&batch);
        let gap_values: Vec<f64> = gap.iter().map(|p| p.value).collect();
        assert_eq!(gap_values, vec![500.0, 1000.0]);
    }

    #[test]
    fn maximum_is_assigned_with_default_request() {
        // 0.999 clamps to the last element, so the max meets its threshold.
        let mut batch = points(&[5.0, 1.0, 3.0]);
        assign_percentiles(&mut batch, None).unwrap();
        assert!(unassigned(&batch).is_empty());
        assert_eq!(batch[0].percentile, Some(0.001));
        assert_eq!(batch[2].percentile, Some(0.75));
    }

    #[test]
    fn ties_share_a_bucket_and_keep_input_order() {
        let mut batch = points(&[2.0, 1.0, 2.0, 2.0]);
        let request = PercentileRequest::new(vec![0.25, 0.5, 0.75]);
        assign_percentiles(&mut batch, Some(&request)).unwrap();

        let keys: Vec<usize> = batch.iter().map(|p| p.key).collect();
        assert_eq!(keys, vec![1, 0, 2, 3]);
        assert_eq!(batch[1].percentile, batch[2].percentile);
        assert_eq!(batch[2].percentile, batch[3].percentile);
    }

    #[test]
    fn request_order_does_not_change_buckets() {
        let mut ordered = points(&[10.0, 20.0, 30.0, 40.0]);
        let mut shuffled = ordered.clone();
        assign_percentiles(
            &mut ordered,
            Some(&PercentileRequest::new(vec![0.25, 0.5, 0.75])),
        )
        .unwrap();
        assign_percentiles(
            &mut shuffled,
            Some(&PercentileRequest::new(vec![0.75, 0.25, 0.5])),
        )
        .unwrap();
        assert_eq!(ordered, shuffled);
    }

    #[test]
    fn empty_batch_fails() {
        let mut batch: Vec<DataPoint<usize>> = Vec::new();
        assert_eq!(
            assign_percentiles(&mut batch, None),
            Err(PercentileBoundsError::EmptySample)
        );
    }

    #[test]
    fn failed_batch_is_left_untouched() {
        let mut batch = points(&[3.0, 1.0, 2.0]);
        let before = batch.clone();
        let request = PercentileRequest::new(vec![0.5, 0.0]);
        assert_eq!(
            assign_percentiles(&mut batch, Some(&request)),
            Err(PercentileBoundsError::ExcludedFraction { fraction: 0.0 })
        );
        assert_eq!(batch, before);
    }

    #[test]
    fn empty_request_falls_back_to_default_fractions() {
        let mut with_empty = points(&[40.0, 10.0, 30.0, 20.0]);
        let mut with_none = with_empty.clone();
        assign_percentiles(&mut with_empty, Some(&PercentileRequest::new(Vec::new()))).unwrap();
        assign_percentiles(&mut with_none, None).unwrap();

        assert!(unassigned(&with_empty).is_empty());
        assert_eq!(with_empty, with_none);
        assert_eq!(with_empty[0].percentile, Some(0.001));
    }

    #[test]
    fn single_measurement_gets_first_fraction() {
        let mut batch = points(&[42.0]);
        assign_percentiles(&mut batch, None).unwrap();
        assert_eq!(batch[0].percentile, Some(0.001));
    }

    #[test]
    fn works_through_mutable_references() {
        let mut a = DataPoint::new("a", 2.0);
        let mut b = DataPoint::new("b", 1.0);
        {
            let mut handles = vec![&mut a, &mut b];
            let request = PercentileRequest::new(vec![0.5]);
            assign_percentiles(&mut handles, Some(&request)).unwrap();
        }
        // Sample [1, 2] has its median at 1.5: only b fits below it.
        assert_eq!(b.percentile, Some(0.5));
        assert_eq!(a.percentile, None);
    }
}
