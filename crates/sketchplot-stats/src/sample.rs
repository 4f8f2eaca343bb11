//! Numeric samples extracted from tabular data
//!
//! A `Sample` only ever holds finite values. Missing cells, text that does
//! not coerce to a number, NaN and infinities are dropped at construction
//! and counted, so downstream statistics never have to re-check.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// An immutable sequence of finite values in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SampleFields")]
pub struct Sample {
    values: Vec<f64>,
    dropped: usize,
}

impl Sample {
    /// Build a sample, discarding non-finite values
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut dropped = 0;
        let values = values
            .into_iter()
            .filter(|v| {
                let keep = v.is_finite();
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect();

        Self { values, dropped }
    }

    /// Build a sample from raw cell text, discarding cells that do not coerce
    pub fn from_strs<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut dropped = 0;
        let values = cells
            .into_iter()
            .filter_map(|cell| {
                let parsed = Self::parse_lenient(cell);
                if parsed.is_none() {
                    dropped += 1;
                }
                parsed
            })
            .collect();

        Self { values, dropped }
    }

    /// Coerce a cell to a finite number
    ///
    /// Surrounding whitespace and thousands separators (`1,234.5`) are
    /// accepted. Empty cells and non-finite results yield `None`.
    pub fn parse_lenient(cell: &str) -> Option<f64> {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return None;
        }

        let parsed = if trimmed.contains(',') {
            trimmed.replace(',', "").parse::<f64>().ok()?
        } else {
            trimmed.parse::<f64>().ok()?
        };

        parsed.is_finite().then_some(parsed)
    }

    /// Number of usable values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of inputs discarded during construction
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Values in input order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values sorted ascending
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    pub fn min(&self) -> StatsResult<f64> {
        self.values
            .iter()
            .copied()
            .reduce(f64::min)
            .ok_or(StatsError::EmptyInput)
    }

    pub fn max(&self) -> StatsResult<f64> {
        self.values
            .iter()
            .copied()
            .reduce(f64::max)
            .ok_or(StatsError::EmptyInput)
    }

    /// Quantile at fraction `q` by linear interpolation on rank
    pub fn quantile(&self, q: f64) -> StatsResult<f64> {
        if self.is_empty() {
            return Err(StatsError::EmptyInput);
        }
        check_fraction(q)?;
        Ok(quantile_sorted(&self.sorted(), q))
    }

    /// Sample of `log10(v)` for every strictly positive value
    ///
    /// Used by log-scaled histograms. Non-positive values are counted as
    /// dropped; the result may be empty.
    pub fn log10_positive(&self) -> Sample {
        let positive: Vec<f64> = self
            .values
            .iter()
            .filter(|v| **v > 0.0)
            .map(|v| v.log10())
            .collect();
        let dropped = self.dropped + (self.values.len() - positive.len());

        Sample {
            values: positive,
            dropped,
        }
    }
}

/// Wire form of [`Sample`], checked before it becomes one
#[derive(Deserialize)]
struct SampleFields {
    values: Vec<f64>,
    #[serde(default)]
    dropped: usize,
}

impl TryFrom<SampleFields> for Sample {
    type Error = StatsError;

    fn try_from(fields: SampleFields) -> StatsResult<Self> {
        if fields.values.iter().any(|v| !v.is_finite()) {
            return Err(StatsError::invalid_range("sample values must be finite"));
        }
        Ok(Sample {
            values: fields.values,
            dropped: fields.dropped,
        })
    }
}

impl FromIterator<f64> for Sample {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl From<Vec<f64>> for Sample {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(values)
    }
}

/// Quantile of pre-sorted data by linear interpolation on rank
///
/// With `p = (n - 1) * q`, `b = floor(p)` and `f = p - b` the result is
/// `sorted[b] + f * (sorted[b + 1] - sorted[b])`, or `sorted[b]` when `b` is
/// the last rank. `sorted` must be non-empty and ascending, `q` in `[0, 1]`;
/// unsorted input gives a meaningless value but never panics.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    debug_assert!(n > 0, "quantile of empty data");

    let pos = (n - 1) as f64 * q;
    let base = pos.floor() as usize;
    let rest = pos - base as f64;

    match sorted.get(base + 1) {
        // Rounding must not carry the result past its bracketing values.
        Some(&next) => {
            let low = sorted[base];
            (low + rest * (next - low)).clamp(low.min(next), low.max(next))
        }
        None => sorted[base.min(n - 1)],
    }
}

fn check_fraction(q: f64) -> StatsResult<()> {
    if !(0.0..=1.0).contains(&q) {
        return Err(StatsError::invalid_range(format!(
            "quantile fraction {q} outside [0, 1]"
        )));
    }
    Ok(())
}
