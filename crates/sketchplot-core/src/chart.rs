//! Chart preparation pipelines
//!
//! Each pipeline turns a sample (or grouped rows) plus a [`ChartConfig`]
//! into a value object holding every number the rendering surface needs:
//! statistics, view ranges, tick steps and tick values. Preparing twice from
//! the same input yields identical output.

use serde::{Deserialize, Serialize};
use sketchplot_io::{CrossRecord, DataReader};
use sketchplot_stats::{
    bin, jitter, summarize, BinSet, BoxSummary, Ecdf, OutlierPoint, Sample, StatsError,
};

use crate::axis::{integer_step, padded_max, pick_step, tick_values};
use crate::config::ChartConfig;
use crate::error::ChartResult;
use crate::group::{ranked_totals, CrossTab, GroupedSample, LabelTotal};

/// Chart kinds with a preparation pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    BoxPlot,
    Histogram,
    Ecdf,
    Strip,
    LogHistogram,
    Bar,
    Heatmap,
}

/// Prepared data for any chart kind
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreparedChart {
    BoxPlot(BoxPlotData),
    Histogram(HistogramData),
    Ecdf(EcdfData),
    Strip(StripPlotData),
    LogHistogram(LogHistogramData),
    Bar(BarData),
    Heatmap(HeatmapData),
}

/// Read the configured columns from `reader` and prepare a chart
pub fn prepare_from_reader(
    reader: &dyn DataReader,
    kind: ChartKind,
    config: &ChartConfig,
) -> ChartResult<PreparedChart> {
    config.validate()?;
    let value_column = config.columns.value.as_str();

    let prepared = match kind {
        ChartKind::BoxPlot => {
            PreparedChart::BoxPlot(BoxPlotData::prepare(&reader.read_sample(value_column)?, config)?)
        }
        ChartKind::Histogram => PreparedChart::Histogram(HistogramData::prepare(
            &reader.read_sample(value_column)?,
            config,
        )?),
        ChartKind::Ecdf => {
            PreparedChart::Ecdf(EcdfData::prepare(&reader.read_sample(value_column)?, config)?)
        }
        ChartKind::Strip => {
            let labeled = reader.read_labeled(&config.columns.category, value_column)?;
            let groups = GroupedSample::from_pairs(labeled.pairs());
            PreparedChart::Strip(StripPlotData::prepare(&groups, config)?)
        }
        ChartKind::LogHistogram => PreparedChart::LogHistogram(LogHistogramData::prepare(
            &reader.read_sample(value_column)?,
            config,
        )?),
        ChartKind::Bar => {
            let labeled = reader.read_labeled(&config.columns.category, value_column)?;
            PreparedChart::Bar(BarData::prepare(labeled.pairs(), config)?)
        }
        ChartKind::Heatmap => {
            let records =
                reader.read_cross(&config.columns.category, &config.columns.cross, value_column)?;
            PreparedChart::Heatmap(HeatmapData::prepare(&records, config)?)
        }
    };

    tracing::info!(?kind, column = value_column, "prepared chart");
    Ok(prepared)
}

/// Box plot: summary, jittered outliers and a fence-based view
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotData {
    pub summary: BoxSummary,
    pub outliers: Vec<OutlierPoint>,
    /// Visible value range `(low, high)`
    pub view: (f64, f64),
    pub step: f64,
    pub ticks: Vec<f64>,
}

impl BoxPlotData {
    /// The view spans the fences plus `fence_padding` of their span on each
    /// side, so the box stays readable; outliers beyond it are drawn clamped.
    pub fn prepare(sample: &Sample, config: &ChartConfig) -> ChartResult<Self> {
        let summary = summarize(sample)?;
        let settings = &config.box_plot;

        let pad = (summary.high_fence - summary.low_fence) * settings.fence_padding;
        let mut low = summary.low_fence - pad;
        if settings.clamp_at_zero {
            low = low.max(0.0);
        }
        let high = summary.high_fence + pad;

        let step = pick_step(high, config.axis.target_ticks)?;
        let ticks = tick_values(high, step)
            .into_iter()
            .filter(|v| *v >= low)
            .collect();
        let outliers = summary.outlier_points(settings.jitter_amplitude);

        tracing::debug!(
            low,
            high,
            step,
            outliers = outliers.len(),
            "prepared box plot"
        );

        Ok(Self {
            summary,
            outliers,
            view: (low, high),
            step,
            ticks,
        })
    }
}

/// Histogram over `[0, padded max]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistogramData {
    pub bins: BinSet,
    /// Horizontal range `(0, padded max)`
    pub x_range: (f64, f64),
    pub x_step: f64,
    pub x_ticks: Vec<f64>,
    /// Count axis step, at least 1
    pub y_step: f64,
    pub y_ticks: Vec<f64>,
}

impl HistogramData {
    pub fn prepare(sample: &Sample, config: &ChartConfig) -> ChartResult<Self> {
        let max_x = padded_max(sample.max()?, config.axis.range_padding);
        let bins = bin(sample, 0.0, max_x, config.histogram.bin_count)?;

        let x_step = pick_step(max_x, config.axis.x_target_ticks)?;
        let y_step = integer_step(bins.max_count, config.axis.target_ticks)?;

        tracing::debug!(
            max_x,
            bins = bins.len(),
            max_count = bins.max_count,
            "prepared histogram"
        );

        Ok(Self {
            x_ticks: tick_values(max_x, x_step),
            y_ticks: tick_values(bins.max_count as f64, y_step),
            bins,
            x_range: (0.0, max_x),
            x_step,
            y_step,
        })
    }
}

/// ECDF with a horizontal range of `[0, padded max]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EcdfData {
    pub ecdf: Ecdf,
    pub x_range: (f64, f64),
    pub x_step: f64,
    pub x_ticks: Vec<f64>,
    /// Probability gridlines
    pub y_ticks: Vec<f64>,
}

impl EcdfData {
    pub fn prepare(sample: &Sample, config: &ChartConfig) -> ChartResult<Self> {
        let ecdf = Ecdf::build(sample)?;
        let max_x = padded_max(ecdf.max(), config.axis.range_padding);
        let x_step = pick_step(max_x, config.axis.x_target_ticks)?;

        tracing::debug!(n = ecdf.len(), max_x, x_step, "prepared ecdf");

        Ok(Self {
            x_ticks: tick_values(max_x, x_step),
            y_ticks: vec![0.0, 0.25, 0.5, 0.75, 1.0],
            ecdf,
            x_range: (0.0, max_x),
            x_step,
        })
    }
}

/// One strip plot point
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StripPoint {
    /// Index into `StripPlotData::categories`
    pub band: usize,
    pub value: f64,
    /// Offset from the band center, as a fraction of the band width
    pub offset: f64,
}

/// Strip plot of the top categories by count
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StripPlotData {
    /// Category labels, one band each, most populated first
    pub categories: Vec<String>,
    pub points: Vec<StripPoint>,
    /// Value range `(0, padded max)` over every group
    pub y_range: (f64, f64),
    pub y_step: f64,
    pub y_ticks: Vec<f64>,
    /// Pointer radius for hover lookups
    pub hover_radius: f64,
}

impl StripPlotData {
    pub fn prepare(groups: &GroupedSample, config: &ChartConfig) -> ChartResult<Self> {
        let max_y = padded_max(groups.all_values().max()?, config.axis.range_padding);
        let y_step = pick_step(max_y, config.axis.target_ticks)?;
        let fraction = config.strip.jitter_fraction;

        let top = groups.top_by_count(config.group.top_n);
        let categories: Vec<String> = top.iter().map(|g| g.label.clone()).collect();

        let mut points = Vec::new();
        let mut index = 0usize;
        for (band, group) in top.iter().enumerate() {
            for &value in &group.values {
                points.push(StripPoint {
                    band,
                    value,
                    offset: jitter(index, value, fraction),
                });
                index += 1;
            }
        }

        tracing::debug!(
            categories = categories.len(),
            points = points.len(),
            max_y,
            "prepared strip plot"
        );

        Ok(Self {
            categories,
            points,
            y_range: (0.0, max_y),
            y_step,
            y_ticks: tick_values(max_y, y_step),
            hover_radius: config.strip.hover_radius,
        })
    }
}

/// A horizontal tick of a log-scaled axis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogTick {
    /// Data value the tick labels
    pub value: f64,
    /// `log10(value)`, the tick's position on the axis
    pub position: f64,
}

/// Histogram of `log10` of the strictly positive values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogHistogramData {
    /// Bins over `log10` space
    pub bins: BinSet,
    /// Horizontal range in whole decades `(floor(log min), ceil(log max))`
    pub log_range: (f64, f64),
    /// 1, 2 and 5 times each power of ten inside the data range
    pub x_ticks: Vec<LogTick>,
    pub y_step: f64,
    pub y_ticks: Vec<f64>,
    /// Zero, negative and unparseable inputs
    pub dropped: usize,
}

impl LogHistogramData {
    pub fn prepare(sample: &Sample, config: &ChartConfig) -> ChartResult<Self> {
        let logged = sample.log10_positive();
        let (low_log, high_log) = (logged.min()?, logged.max()?);

        let low = low_log.floor();
        let mut high = high_log.ceil();
        if high <= low {
            high = low + 1.0;
        }
        let bins = bin(&logged, low, high, config.histogram.log_bin_count)?;
        let y_step = integer_step(bins.max_count, config.axis.target_ticks)?;

        // Tick bounds come from the raw values so decades at the data edges
        // are not lost to log/pow rounding.
        let positive = || sample.values().iter().copied().filter(|v| *v > 0.0);
        let min_value = positive().fold(f64::INFINITY, f64::min);
        let max_value = positive().fold(f64::NEG_INFINITY, f64::max);
        let x_ticks = (low as i32..=high as i32)
            .flat_map(|exp| [1.0, 2.0, 5.0].map(|m| m * 10f64.powi(exp)))
            .filter(|v| *v >= min_value && *v <= max_value)
            .map(|value| LogTick {
                value,
                position: value.log10(),
            })
            .collect();

        tracing::debug!(
            low,
            high,
            kept = logged.len(),
            dropped = logged.dropped(),
            "prepared log histogram"
        );

        Ok(Self {
            y_ticks: tick_values(bins.max_count as f64, y_step),
            bins,
            log_range: (low, high),
            x_ticks,
            y_step,
            dropped: logged.dropped(),
        })
    }
}

/// Per-category totals for bar and dot plots, largest first
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarData {
    /// At most `group.top_n` categories
    pub bars: Vec<LabelTotal>,
    pub step: f64,
    /// Top of the value axis, the largest total rounded up to a whole step
    pub axis_max: f64,
    pub ticks: Vec<f64>,
}

impl BarData {
    pub fn prepare(
        pairs: impl IntoIterator<Item = (String, f64)>,
        config: &ChartConfig,
    ) -> ChartResult<Self> {
        let mut bars = ranked_totals(pairs);
        bars.truncate(config.group.top_n);

        let max_total = bars.first().map(|b| b.total).ok_or(StatsError::EmptyInput)?;
        let step = pick_step(max_total, config.axis.target_ticks)?;
        let axis_max = (max_total / step).ceil() * step;

        tracing::debug!(bars = bars.len(), max_total, step, "prepared bar chart");

        Ok(Self {
            ticks: tick_values(axis_max, step),
            bars,
            step,
            axis_max,
        })
    }
}

/// Summed values over a category × column grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeatmapData {
    pub table: CrossTab,
    /// Smallest and largest cell, the ends of the color scale
    pub value_range: (f64, f64),
}

impl HeatmapData {
    pub fn prepare(records: &[CrossRecord], config: &ChartConfig) -> ChartResult<Self> {
        let table = CrossTab::sum(records, config.group.top_n);
        if table.rows.is_empty() || table.columns.is_empty() {
            return Err(StatsError::EmptyInput.into());
        }

        let cells = table.cells.iter().flatten().copied();
        let low = cells.clone().fold(f64::INFINITY, f64::min);
        let high = cells.fold(f64::NEG_INFINITY, f64::max);

        tracing::debug!(
            rows = table.rows.len(),
            columns = table.columns.len(),
            low,
            high,
            "prepared heatmap"
        );

        Ok(Self {
            table,
            value_range: (low, high),
        })
    }

    /// Cell value normalized onto `[0, 1]` of the color scale
    ///
    /// A grid where every cell is equal maps to 0.
    pub fn intensity(&self, row: usize, column: usize) -> Option<f64> {
        let value = *self.table.cells.get(row)?.get(column)?;
        let (low, high) = self.value_range;
        if high <= low {
            return Some(0.0);
        }
        Some(((value - low) / (high - low)).clamp(0.0, 1.0))
    }
}
