//! Uniform-width histogram binning
//!
//! Values outside the configured range are clamped into the first or last
//! bin instead of being dropped, so the total count always equals the
//! sample size.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::sample::Sample;

/// Bin edges and per-bin counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinSet {
    /// `bin_count + 1` strictly increasing edges
    pub edges: Vec<f64>,
    /// Count of values in `[edges[i], edges[i + 1])`, last bin closed
    pub counts: Vec<usize>,
    /// Largest entry of `counts`
    pub max_count: usize,
}

impl BinSet {
    /// Number of bins
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn range_min(&self) -> f64 {
        self.edges[0]
    }

    pub fn range_max(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Width shared by every bin
    pub fn bin_width(&self) -> f64 {
        (self.range_max() - self.range_min()) / self.len() as f64
    }

    /// Clamped index of the bin `value` falls into
    pub fn bin_index_of(&self, value: f64) -> usize {
        clamped_index(value, self.range_min(), self.bin_width(), self.len())
    }

    /// `(lower edge, upper edge, count)` of bin `index`
    pub fn bin_range(&self, index: usize) -> Option<(f64, f64, usize)> {
        let count = *self.counts.get(index)?;
        Some((self.edges[index], self.edges[index + 1], count))
    }
}

/// Bin a sample into `bin_count` uniform bins over `[range_min, range_max]`
///
/// Fails with [`StatsError::InvalidRange`] when `bin_count` is zero, either
/// bound is not finite, or `range_max <= range_min`.
pub fn bin(sample: &Sample, range_min: f64, range_max: f64, bin_count: usize) -> StatsResult<BinSet> {
    if bin_count == 0 {
        return Err(StatsError::invalid_range("bin count must be at least 1"));
    }
    if !range_min.is_finite() || !range_max.is_finite() {
        return Err(StatsError::invalid_range(format!(
            "non-finite bin range [{range_min}, {range_max}]"
        )));
    }
    if range_max <= range_min {
        return Err(StatsError::invalid_range(format!(
            "bin range max {range_max} must exceed min {range_min}"
        )));
    }

    let span = range_max - range_min;
    let width = span / bin_count as f64;

    let edges: Vec<f64> = (0..=bin_count)
        .map(|i| range_min + i as f64 * span / bin_count as f64)
        .collect();

    let mut counts = vec![0usize; bin_count];
    let mut clamped = 0usize;
    for &v in sample.values() {
        if v < range_min || v > range_max {
            clamped += 1;
        }
        counts[clamped_index(v, range_min, width, bin_count)] += 1;
    }

    if clamped > 0 {
        tracing::debug!(clamped, range_min, range_max, "clamped values into boundary bins");
    }

    let max_count = counts.iter().copied().max().unwrap_or(0);

    Ok(BinSet {
        edges,
        counts,
        max_count,
    })
}

fn clamped_index(value: f64, range_min: f64, width: f64, bin_count: usize) -> usize {
    let raw = ((value - range_min) / width).floor();
    if raw <= 0.0 || raw.is_nan() {
        0
    } else {
        (raw as usize).min(bin_count - 1)
    }
}
