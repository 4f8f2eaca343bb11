//! Box plot summaries
//!
//! Provides the quantities a box plot needs:
//! - Five-number summary (min, q1, median, q3, max)
//! - IQR fences at 1.5 × IQR
//! - Whiskers at the most extreme non-outlier values
//! - Outliers, with stable jitter offsets for display

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::jitter::jitter;
use crate::sample::{quantile_sorted, Sample};

/// Multiplier applied to the IQR to place the fences
pub const FENCE_FACTOR: f64 = 1.5;

/// Quantile summary of a sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    /// Number of values summarized
    pub count: usize,
    pub min: f64,
    /// 25th percentile
    pub q1: f64,
    pub median: f64,
    /// 75th percentile
    pub q3: f64,
    pub max: f64,
    /// Interquartile range (q3 - q1)
    pub iqr: f64,
    /// q1 - 1.5 × IQR
    pub low_fence: f64,
    /// q3 + 1.5 × IQR
    pub high_fence: f64,
    /// Smallest value not below the low fence
    pub whisker_low: f64,
    /// Largest value not above the high fence
    pub whisker_high: f64,
    /// Values strictly outside the fences, ascending
    pub outliers: Vec<f64>,
    /// Sorted rank of each entry in `outliers`
    outlier_ranks: Vec<usize>,
}

/// An outlier placed for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierPoint {
    /// Rank of the value in the sorted sample
    pub rank: usize,
    pub value: f64,
    /// Stable sideways offset, see [`jitter`]
    pub offset: f64,
}

impl BoxSummary {
    /// Whether `value` lies strictly outside the fences
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.low_fence || value > self.high_fence
    }

    /// Outliers with display offsets in `[-amplitude, amplitude]`
    ///
    /// Offsets depend only on each outlier's rank and value, so repeated
    /// calls return identical points.
    pub fn outlier_points(&self, amplitude: f64) -> Vec<OutlierPoint> {
        self.outlier_ranks
            .iter()
            .zip(&self.outliers)
            .map(|(&rank, &value)| OutlierPoint {
                rank,
                value,
                offset: jitter(rank, value, amplitude),
            })
            .collect()
    }

    /// Total range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Compute the box plot summary of a sample
///
/// Fails with [`StatsError::EmptyInput`] when the sample has no values.
pub fn summarize(sample: &Sample) -> StatsResult<BoxSummary> {
    if sample.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    summarize_sorted(&sample.sorted())
}

/// Compute the box plot summary of ascending data
pub fn summarize_sorted(sorted: &[f64]) -> StatsResult<BoxSummary> {
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Err(StatsError::EmptyInput);
    };

    let q1 = quantile_sorted(sorted, 0.25);
    let median = quantile_sorted(sorted, 0.5);
    let q3 = quantile_sorted(sorted, 0.75);

    let iqr = q3 - q1;
    let low_fence = q1 - FENCE_FACTOR * iqr;
    let high_fence = q3 + FENCE_FACTOR * iqr;

    // Whiskers fall back to the extremes when no value qualifies.
    let whisker_low = sorted
        .iter()
        .copied()
        .find(|v| *v >= low_fence)
        .unwrap_or_else(|| {
            tracing::warn!(low_fence, "no value above low fence, whisker falls back to min");
            min
        });
    let whisker_high = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= high_fence)
        .unwrap_or_else(|| {
            tracing::warn!(high_fence, "no value below high fence, whisker falls back to max");
            max
        });

    let (outlier_ranks, outliers): (Vec<usize>, Vec<f64>) = sorted
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| *v < low_fence || *v > high_fence)
        .unzip();

    tracing::debug!(
        count = sorted.len(),
        q1,
        median,
        q3,
        low_fence,
        high_fence,
        outliers = outliers.len(),
        "computed box summary"
    );

    Ok(BoxSummary {
        count: sorted.len(),
        min,
        q1,
        median,
        q3,
        max,
        iqr,
        low_fence,
        high_fence,
        whisker_low,
        whisker_high,
        outliers,
        outlier_ranks,
    })
}
