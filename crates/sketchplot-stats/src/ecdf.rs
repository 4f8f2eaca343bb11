//! Empirical Cumulative Distribution Function (ECDF)
//!
//! The ECDF is a step function that estimates the underlying CDF of a sample.
//! The value at sorted rank `i` carries cumulative probability `(i + 1) / n`,
//! so the curve climbs from `(min, 1/n)` to `(max, 1)`.
//!
//! Hover lookups use [`Ecdf::nearest_index`], an O(log n) binary search for
//! the sample value closest to a target.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::sample::Sample;

/// Empirical Cumulative Distribution Function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EcdfFields")]
pub struct Ecdf {
    /// Sorted values, never empty
    values: Vec<f64>,
}

/// Wire form of [`Ecdf`]; rebuilt through [`Ecdf::build`] so the values
/// come back sorted, finite and non-empty
#[derive(Deserialize)]
struct EcdfFields {
    values: Vec<f64>,
}

impl TryFrom<EcdfFields> for Ecdf {
    type Error = StatsError;

    fn try_from(fields: EcdfFields) -> StatsResult<Self> {
        let sample = Sample::from_values(fields.values);
        if sample.dropped() > 0 {
            return Err(StatsError::invalid_range("ecdf values must be finite"));
        }
        Ecdf::build(&sample)
    }
}

impl Ecdf {
    /// Build an ECDF from a sample
    ///
    /// Time complexity: O(n log n) for sorting
    pub fn build(sample: &Sample) -> StatsResult<Self> {
        if sample.is_empty() {
            return Err(StatsError::EmptyInput);
        }
        Ok(Self {
            values: sample.sorted(),
        })
    }

    /// Cumulative probability at sorted rank `index`: `(index + 1) / n`
    ///
    /// Ranks past the end are clamped to the last one.
    pub fn probability_at(&self, index: usize) -> f64 {
        let n = self.values.len();
        (index.min(n - 1) + 1) as f64 / n as f64
    }

    /// Rank of the sorted value closest to `target`
    ///
    /// Narrows `[lo, hi]` until the two are adjacent, then picks whichever
    /// is numerically closer. Ties go to the higher rank.
    /// Time complexity: O(log n)
    pub fn nearest_index(&self, target: f64) -> usize {
        let values = &self.values;
        let mut lo = 0;
        let mut hi = values.len() - 1;

        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if values[mid] < target {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        if (values[lo] - target).abs() < (values[hi] - target).abs() {
            lo
        } else {
            hi
        }
    }

    /// Evaluate the ECDF at a point
    ///
    /// Returns the proportion of values <= x
    /// Time complexity: O(log n)
    pub fn evaluate(&self, x: f64) -> f64 {
        let at_or_below = self.values.partition_point(|v| *v <= x);
        at_or_below as f64 / self.values.len() as f64
    }

    /// Get the quantile (inverse CDF)
    ///
    /// Returns the smallest value whose cumulative probability is >= p
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if !(0.0..=1.0).contains(&p) {
            return None;
        }

        let n = self.values.len();
        let rank = (p * n as f64).ceil() as usize;
        Some(self.values[rank.saturating_sub(1).min(n - 1)])
    }

    /// Get the number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the sorted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn min(&self) -> f64 {
        self.values[0]
    }

    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// `(value, cumulative probability)` for every rank, as drawn on the curve
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, self.probability_at(i)))
            .collect()
    }

    /// Get points for step-function plotting (x, y pairs)
    ///
    /// Starts at `(min, 0)`, then a horizontal run and a vertical rise for
    /// every sample value.
    pub fn step_points(&self) -> Vec<(f64, f64)> {
        let mut points = Vec::with_capacity(self.values.len() * 2 + 1);
        points.push((self.values[0], 0.0));

        for (i, &v) in self.values.iter().enumerate() {
            if i > 0 {
                points.push((v, self.probability_at(i - 1)));
            }
            points.push((v, self.probability_at(i)));
        }

        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ecdf(values: &[f64]) -> Ecdf {
        Ecdf::build(&Sample::from(values.to_vec())).unwrap()
    }

    #[test]
    fn test_deserialize_rebuilds_invariants() {
        let err = serde_json::from_str::<Ecdf>(r#"{"values":[]}"#).unwrap_err();
        assert!(err.to_string().contains("empty"));

        let ecdf: Ecdf = serde_json::from_str(r#"{"values":[3.0,1.0,2.0]}"#).unwrap();
        assert_eq!(ecdf.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(ecdf.nearest_index(2.6), 2);
    }

    #[test]
    fn test_ecdf_basic() {
        let ecdf = ecdf(&[3.0, 1.0, 2.0, 5.0, 4.0]);

        assert_eq!(ecdf.len(), 5);
        assert_eq!(ecdf.values(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(ecdf.evaluate(0.0), 0.0);
        assert_eq!(ecdf.evaluate(1.0), 0.2);
        assert_eq!(ecdf.evaluate(3.0), 0.6);
        assert_eq!(ecdf.evaluate(5.0), 1.0);
        assert_eq!(ecdf.evaluate(6.0), 1.0);
    }

    #[test]
    fn test_ecdf_empty() {
        assert_eq!(Ecdf::build(&Sample::default()), Err(StatsError::EmptyInput));
    }

    #[test]
    fn test_probability_at() {
        let ecdf = ecdf(&[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(ecdf.probability_at(0), 0.25);
        assert_eq!(ecdf.probability_at(3), 1.0);
        assert_eq!(ecdf.probability_at(99), 1.0);
    }

    #[test]
    fn test_nearest_index() {
        let ecdf = ecdf(&[1.0, 4.0, 9.0, 16.0]);
        assert_eq!(ecdf.nearest_index(-100.0), 0);
        assert_eq!(ecdf.nearest_index(3.0), 1);
        assert_eq!(ecdf.nearest_index(8.0), 2);
        assert_eq!(ecdf.nearest_index(1000.0), 3);
    }

    #[test]
    fn test_nearest_index_tie_prefers_higher() {
        let ecdf = ecdf(&[0.0, 10.0]);
        assert_eq!(ecdf.nearest_index(5.0), 1);
    }

    #[test]
    fn test_nearest_index_single_value() {
        let ecdf = ecdf(&[7.0]);
        assert_eq!(ecdf.nearest_index(-3.0), 0);
        assert_eq!(ecdf.nearest_index(7.0), 0);
    }

    #[test]
    fn test_ecdf_quantiles() {
        let data: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        let ecdf = ecdf(&data);

        assert_eq!(ecdf.quantile(0.0), Some(1.0));
        assert_eq!(ecdf.quantile(0.5), Some(50.0));
        assert_eq!(ecdf.quantile(1.0), Some(100.0));
        assert_eq!(ecdf.quantile(1.2), None);
    }

    #[test]
    fn test_ecdf_duplicates() {
        let ecdf = ecdf(&[1.0, 1.0, 2.0, 2.0, 2.0, 3.0]);

        assert!((ecdf.evaluate(1.0) - 2.0 / 6.0).abs() < 1e-10);
        assert!((ecdf.evaluate(2.0) - 5.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_ecdf_step_points() {
        let ecdf = ecdf(&[1.0, 2.0, 3.0]);
        let points = ecdf.step_points();

        assert_eq!(points[0], (1.0, 0.0));
        assert_eq!(points.len(), 6);
        assert_eq!(*points.last().unwrap(), (3.0, 1.0));
    }

    #[test]
    fn test_ecdf_points_monotone() {
        let ecdf = ecdf(&[5.0, 3.0, 3.0, 8.0]);
        let points = ecdf.points();

        assert_eq!(points.first(), Some(&(3.0, 0.25)));
        assert_eq!(points.last(), Some(&(8.0, 1.0)));
        assert!(points.windows(2).all(|w| w[0].0 <= w[1].0 && w[0].1 < w[1].1));
    }
}
