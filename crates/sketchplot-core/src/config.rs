//! Configuration for chart preparation
//!
//! Every parameter a sketch used to hardcode (column names, bin count, tick
//! targets, paddings, jitter widths) lives here and is passed explicitly.
//! Any section or field left out of a TOML file takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Chart-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Which table columns to read
    pub columns: ColumnConfig,
    /// Tick targets and range padding
    pub axis: AxisSettings,
    /// Histogram settings
    pub histogram: HistogramConfig,
    /// Box plot settings
    pub box_plot: BoxPlotConfig,
    /// Strip plot settings
    pub strip: StripConfig,
    /// Category grouping settings
    pub group: GroupConfig,
}

/// Column selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Numeric column under analysis
    pub value: String,
    /// Category column for grouped charts, and the heatmap rows
    pub category: String,
    /// Heatmap column labels
    pub cross: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            value: "Total_Sales".to_string(),
            category: "Category".to_string(),
            cross: "Month".to_string(),
        }
    }
}

/// Axis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSettings {
    /// Tick target for value axes
    pub target_ticks: usize,
    /// Tick target for the horizontal axis of histograms and ECDFs
    pub x_target_ticks: usize,
    /// Fraction added above the data maximum
    pub range_padding: f64,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            target_ticks: 6,
            x_target_ticks: 7,
            range_padding: 0.05,
        }
    }
}

/// Histogram configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Number of uniform bins
    pub bin_count: usize,
    /// Number of bins over `log10` space for log histograms
    pub log_bin_count: usize,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bin_count: 30,
            log_bin_count: 28,
        }
    }
}

/// Box plot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxPlotConfig {
    /// View padding as a fraction of the fence span
    pub fence_padding: f64,
    /// Outlier jitter half-width, in caller units
    pub jitter_amplitude: f64,
    /// Keep the lower view bound at or above zero
    pub clamp_at_zero: bool,
}

impl Default for BoxPlotConfig {
    fn default() -> Self {
        Self {
            fence_padding: 0.08,
            jitter_amplitude: 30.0,
            clamp_at_zero: true,
        }
    }
}

/// Strip plot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Jitter half-width as a fraction of one category band
    pub jitter_fraction: f64,
    /// Pointer hit radius, in caller units
    pub hover_radius: f64,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            jitter_fraction: 0.18,
            hover_radius: 8.0,
        }
    }
}

/// Category grouping configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    /// Number of categories (or heatmap rows) kept
    pub top_n: usize,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self { top_n: 10 }
    }
}

impl ChartConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> ChartResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| ChartError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ChartError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded chart config");
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> ChartResult<String> {
        toml::to_string_pretty(self).map_err(|e| ChartError::InvalidConfig(e.to_string()))
    }

    /// Validate configuration values
    pub fn validate(&self) -> ChartResult<()> {
        if self.columns.value.trim().is_empty() {
            return Err(invalid("columns.value must name a column"));
        }

        if self.histogram.bin_count == 0 || self.histogram.log_bin_count == 0 {
            return Err(invalid("histogram bin counts must be at least 1"));
        }

        if self.axis.target_ticks == 0 || self.axis.x_target_ticks == 0 {
            return Err(invalid("axis tick targets must be at least 1"));
        }

        if !non_negative(self.axis.range_padding) {
            return Err(invalid("axis.range_padding must be non-negative"));
        }

        if !non_negative(self.box_plot.fence_padding)
            || !non_negative(self.box_plot.jitter_amplitude)
        {
            return Err(invalid("box_plot paddings must be non-negative"));
        }

        if !(0.0..=0.5).contains(&self.strip.jitter_fraction) {
            return Err(invalid("strip.jitter_fraction must be between 0.0 and 0.5"));
        }

        if !non_negative(self.strip.hover_radius) || self.strip.hover_radius == 0.0 {
            return Err(invalid("strip.hover_radius must be positive"));
        }

        if self.group.top_n == 0 {
            return Err(invalid("group.top_n must be at least 1"));
        }

        Ok(())
    }
}

// NaN fails every comparison, so it is rejected too.
fn non_negative(value: f64) -> bool {
    value >= 0.0
}

fn invalid(message: &str) -> ChartError {
    ChartError::InvalidConfig(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChartConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.columns.value, "Total_Sales");
        assert_eq!(config.histogram.bin_count, 30);
        assert_eq!(config.axis.target_ticks, 6);
    }

    #[test]
    fn test_partial_toml() {
        let config = ChartConfig::from_toml_str(
            r#"
            [columns]
            value = "Quantity"

            [histogram]
            bin_count = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.columns.value, "Quantity");
        assert_eq!(config.columns.category, "Category");
        assert_eq!(config.histogram.bin_count, 12);
        assert_eq!(config.histogram.log_bin_count, 28);
        assert_eq!(config.columns.cross, "Month");
        assert_eq!(config.box_plot, BoxPlotConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ChartConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(ChartConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_bin_count() {
        let result = ChartConfig::from_toml_str("[histogram]\nbin_count = 0\n");
        assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_log_bin_count() {
        let result = ChartConfig::from_toml_str("[histogram]\nlog_bin_count = 0\n");
        assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_padding() {
        let mut config = ChartConfig::default();
        config.axis.range_padding = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(ChartConfig::from_toml_str("[histogram\nbin_count = 3").is_err());
    }
}
