//! Error types for sketchplot-core
//!
//! Provides error handling for:
//! - Degenerate statistics input (empty samples, bad ranges)
//! - Table loading failures
//! - Invalid configuration

use sketchplot_io::IoError;
use sketchplot_stats::StatsError;
use thiserror::Error;

/// Main error type for chart preparation
#[derive(Error, Debug)]
pub enum ChartError {
    /// Statistics could not be computed
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// Table loading errors
    #[error("Failed to load data: {0}")]
    Io(#[from] IoError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Output serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ChartError {
    /// Whether the failure came from an empty sample
    ///
    /// Callers typically render a "no data" placeholder in this case.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, ChartError::Stats(StatsError::EmptyInput))
    }
}

/// Result type alias for chart operations
pub type ChartResult<T> = Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_error_display() {
        let err = ChartError::InvalidConfig("bin_count must be at least 1".to_string());
        assert!(err.to_string().contains("bin_count"));
    }

    #[test]
    fn test_stats_error_conversion() {
        let err: ChartError = StatsError::EmptyInput.into();
        assert!(err.is_empty_input());
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_io_error_conversion() {
        let err: ChartError = IoError::ColumnNotFound("Quantity".to_string()).into();
        assert!(!err.is_empty_input());
        assert!(err.to_string().contains("Quantity"));
    }
}
