//! Axis steps, ticks and linear scales
//!
//! Provides "nice" tick spacing (1, 2, 5 or 10 times a power of ten), tick
//! values and labels, and the linear data-to-screen mapping the sketches use
//! for both drawing and reverse-mapping the pointer.

use serde::{Deserialize, Serialize};
use sketchplot_stats::{StatsError, StatsResult};

/// Tick target used when the caller has no preference
pub const DEFAULT_TARGET_TICKS: usize = 6;

/// Pick a human-readable step that splits `[0, max_value]` into roughly
/// `target_ticks` intervals
///
/// `raw = max_value / target_ticks` is normalized to `n` in `[1, 10)` by its
/// power of ten; the multiplier is 1 below 1.5, 2 below 3, 5 below 7 and 10
/// otherwise.
///
/// Fails with [`StatsError::InvalidRange`] when `max_value` is not a positive
/// finite number or `target_ticks` is zero.
pub fn pick_step(max_value: f64, target_ticks: usize) -> StatsResult<f64> {
    if !(max_value.is_finite() && max_value > 0.0) {
        return Err(StatsError::InvalidRange(format!(
            "axis maximum {max_value} must be positive"
        )));
    }
    if target_ticks == 0 {
        return Err(StatsError::InvalidRange(
            "tick target must be at least 1".to_string(),
        ));
    }

    let raw = max_value / target_ticks as f64;
    if !raw.is_normal() {
        return Err(StatsError::InvalidRange(format!(
            "axis maximum {max_value} is too small to step"
        )));
    }
    let magnitude = 10.0_f64.powf(raw.log10().floor());
    let residual = raw / magnitude;

    let multiplier = if residual < 1.5 {
        1.0
    } else if residual < 3.0 {
        2.0
    } else if residual < 7.0 {
        5.0
    } else {
        10.0
    };

    let step = multiplier * magnitude;
    if !(step.is_finite() && step > 0.0) {
        return Err(StatsError::InvalidRange(format!(
            "axis maximum {max_value} is too large to step"
        )));
    }
    Ok(step)
}

/// Step for an integer count axis: `max(1, floor(pick_step))`
///
/// A zero maximum (an all-empty histogram) yields 1.
pub fn integer_step(max_count: usize, target_ticks: usize) -> StatsResult<f64> {
    if max_count == 0 {
        return Ok(1.0);
    }
    let step = pick_step(max_count as f64, target_ticks)?;
    Ok(step.floor().max(1.0))
}

/// Upper bound on the ticks [`tick_values`] will produce
pub const MAX_TICKS: usize = 1000;

/// Tick values `0, step, 2·step, ...` up to and including `max`
///
/// Each value is computed as `i * step` so long axes do not accumulate
/// rounding error. A step that would need more than [`MAX_TICKS`] ticks
/// yields no ticks.
pub fn tick_values(max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0 && max >= 0.0 && max.is_finite()) {
        return Vec::new();
    }
    if max / step > MAX_TICKS as f64 {
        tracing::debug!(max, step, "tick step too fine, no ticks produced");
        return Vec::new();
    }

    // Tolerate the last tick landing a hair past `max` through rounding.
    let limit = max + step * 1e-9;
    (0..)
        .map(|i| i as f64 * step)
        .take_while(|v| *v <= limit)
        .collect()
}

/// Data maximum with a fractional headroom: `max * (1 + padding)`
pub fn padded_max(max: f64, padding: f64) -> f64 {
    max * (1.0 + padding)
}

/// Linear mapping between a data domain and an output range
///
/// The range may be inverted (screen y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a data value into the output range
    ///
    /// A zero-width domain maps everything to the start of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Map a value after clamping it into the domain
    ///
    /// Keeps extreme values (box plot outliers) on the visible area.
    pub fn map_clamped(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        if !(d0.is_finite() && d1.is_finite()) {
            return self.map(value);
        }
        self.map(value.clamp(d0.min(d1), d0.max(d1)))
    }

    /// Map an output coordinate back into the data domain
    pub fn invert(&self, position: f64) -> f64 {
        LinearScale::new(self.range, self.domain).map(position)
    }
}

/// Configuration for an axis
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Data range
    pub min: f64,
    pub max: f64,

    /// Approximate number of intervals
    pub target_ticks: usize,

    /// Label for the axis
    pub label: Option<String>,

    /// Number format string (e.g., ".2f", ".0f")
    pub format: Option<String>,
}

impl AxisConfig {
    /// Create a new axis configuration
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            target_ticks: DEFAULT_TARGET_TICKS,
            label: None,
            format: None,
        }
    }

    /// Set the axis label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the tick target
    pub fn with_target_ticks(mut self, target_ticks: usize) -> Self {
        self.target_ticks = target_ticks;
        self
    }

    /// Set number format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// A tick mark on an axis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickMark {
    /// Position in data coordinates
    pub value: f64,

    /// Position in normalized coordinates (0.0 to 1.0)
    pub normalized: f64,

    /// Label text
    pub label: String,
}

/// Calculate tick marks from zero up to the axis maximum
///
/// Ticks below `config.min` are left out, matching grids that start at zero
/// even when the view is offset.
pub fn calculate_ticks(config: &AxisConfig) -> StatsResult<Vec<TickMark>> {
    let range = config.max - config.min;
    if !(range > 0.0) {
        return Err(StatsError::InvalidRange(format!(
            "axis range [{}, {}] is empty",
            config.min, config.max
        )));
    }

    let step = pick_step(config.max, config.target_ticks)?;
    let ticks = tick_values(config.max, step)
        .into_iter()
        .filter(|v| *v >= config.min)
        .map(|value| TickMark {
            value,
            normalized: ((value - config.min) / range).clamp(0.0, 1.0),
            label: format_number(value, config.format.as_deref()),
        })
        .collect();

    Ok(ticks)
}

/// Format a number for display
///
/// `".Nf"` formats use N decimals; otherwise integers print bare and other
/// values with two decimals.
pub fn format_number(value: f64, format: Option<&str>) -> String {
    match format {
        Some(fmt) if fmt.contains('.') => {
            let precision: usize = fmt
                .chars()
                .skip_while(|c| *c != '.')
                .skip(1)
                .take_while(|c| c.is_ascii_digit())
                .collect::<String>()
                .parse()
                .unwrap_or(2);
            format!("{:.prec$}", value, prec = precision)
        }
        _ => {
            if value.fract().abs() < 1e-9 {
                format!("{:.0}", value)
            } else {
                format!("{:.2}", value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_step_examples() {
        assert_eq!(pick_step(1000.0, 6).unwrap(), 200.0);
        assert_eq!(pick_step(50.0, 6).unwrap(), 10.0);
    }

    #[test]
    fn test_pick_step_rejects_non_positive() {
        assert!(matches!(pick_step(0.0, 6), Err(StatsError::InvalidRange(_))));
        assert!(matches!(pick_step(-5.0, 6), Err(StatsError::InvalidRange(_))));
        assert!(matches!(pick_step(f64::NAN, 6), Err(StatsError::InvalidRange(_))));
        assert!(matches!(pick_step(10.0, 0), Err(StatsError::InvalidRange(_))));
    }

    #[test]
    fn test_pick_step_rejects_extreme_magnitudes() {
        // Subnormal: the raw step underflows to zero.
        assert!(matches!(pick_step(5e-324, 6), Err(StatsError::InvalidRange(_))));
        // The rounded-up step overflows to infinity.
        assert!(matches!(pick_step(f64::MAX, 1), Err(StatsError::InvalidRange(_))));
        assert!(pick_step(1e300, 6).unwrap().is_finite());
    }

    #[test]
    fn test_integer_step() {
        assert_eq!(integer_step(0, 6).unwrap(), 1.0);
        assert_eq!(integer_step(3, 6).unwrap(), 1.0);
        assert_eq!(integer_step(120, 6).unwrap(), 20.0);
    }

    #[test]
    fn test_tick_values() {
        assert_eq!(tick_values(1000.0, 200.0), vec![0.0, 200.0, 400.0, 600.0, 800.0, 1000.0]);
        assert_eq!(tick_values(0.5, 0.2).len(), 3);
        assert!(tick_values(10.0, 0.0).is_empty());
    }

    #[test]
    fn test_tick_values_caps_count() {
        assert!(tick_values(1e12, 1e-3).is_empty());
        assert_eq!(tick_values(1000.0, 1.0).len(), MAX_TICKS + 1);
    }

    #[test]
    fn test_padded_max() {
        assert!((padded_max(200.0, 0.05) - 210.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        let scale = LinearScale::new((0.0, 100.0), (470.0, 60.0));
        assert_eq!(scale.map(0.0), 470.0);
        assert_eq!(scale.map(100.0), 60.0);
        assert!((scale.invert(scale.map(37.0)) - 37.0).abs() < 1e-9);
        assert_eq!(scale.map_clamped(500.0), 60.0);
    }

    #[test]
    fn test_map_clamped_with_nan_domain() {
        let scale = LinearScale::new((f64::NAN, f64::NAN), (0.0, 100.0));
        assert!(scale.map_clamped(5.0).is_nan());

        let half_open = LinearScale::new((0.0, f64::NAN), (0.0, 100.0));
        assert!(half_open.map_clamped(5.0).is_nan());
    }

    #[test]
    fn test_calculate_ticks() {
        let config = AxisConfig::new(0.0, 1000.0);
        let ticks = calculate_ticks(&config).unwrap();

        assert_eq!(ticks.len(), 6);
        assert_eq!(ticks[1].value, 200.0);
        assert_eq!(ticks[1].label, "200");
        assert_eq!(ticks[5].normalized, 1.0);
    }

    #[test]
    fn test_calculate_ticks_offset_view() {
        let config = AxisConfig::new(250.0, 1000.0).with_format(".1f");
        let ticks = calculate_ticks(&config).unwrap();

        assert_eq!(ticks[0].value, 400.0);
        assert_eq!(ticks[0].label, "400.0");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0, None), "3");
        assert_eq!(format_number(0.25, None), "0.25");
        assert_eq!(format_number(0.123456, Some(".3f")), "0.123");
    }
}
