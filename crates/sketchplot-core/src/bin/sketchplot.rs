//! sketchplot - prepare chart data from a CSV column
//!
//! Prints the statistics, view ranges and ticks for one chart as JSON, ready
//! for a rendering surface to consume.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use sketchplot_core::io::open_file;
use sketchplot_core::{prepare_from_reader, ChartConfig, ChartError, ChartKind};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sketchplot", version, about = "Prepare chart data from a CSV column")]
struct Cli {
    /// Delimited data file with a header row (.csv or .tsv)
    input: PathBuf,

    /// Chart to prepare
    #[arg(short, long, value_enum, default_value_t = ChartArg::Box)]
    chart: ChartArg,

    /// Numeric column (overrides the config file)
    #[arg(long)]
    column: Option<String>,

    /// Category column for strip, bar and heatmap charts (overrides the config file)
    #[arg(long)]
    category: Option<String>,

    /// Heatmap column labels (overrides the config file)
    #[arg(long)]
    cross: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ChartArg {
    Box,
    Histogram,
    Ecdf,
    Strip,
    LogHistogram,
    Bar,
    Heatmap,
}

impl From<ChartArg> for ChartKind {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Box => ChartKind::BoxPlot,
            ChartArg::Histogram => ChartKind::Histogram,
            ChartArg::Ecdf => ChartKind::Ecdf,
            ChartArg::Strip => ChartKind::Strip,
            ChartArg::LogHistogram => ChartKind::LogHistogram,
            ChartArg::Bar => ChartKind::Bar,
            ChartArg::Heatmap => ChartKind::Heatmap,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if err.is_empty_input() {
                eprintln!("No valid rows found. Check the file path and column name.");
            } else {
                eprintln!("Error: {err}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, ChartError> {
    let mut config = match &cli.config {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::default(),
    };
    if let Some(column) = cli.column {
        config.columns.value = column;
    }
    if let Some(category) = cli.category {
        config.columns.category = category;
    }
    if let Some(cross) = cli.cross {
        config.columns.cross = cross;
    }

    let path = cli.input.to_string_lossy();
    let reader = open_file(&path)?;
    let prepared = prepare_from_reader(reader.as_ref(), cli.chart.into(), &config)?;

    Ok(serde_json::to_string_pretty(&prepared)?)
}
