//! Error types for statistics computations

use thiserror::Error;

/// Errors raised when a computation is given degenerate input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// The sample has no usable values after filtering
    #[error("Sample is empty: no usable numeric values")]
    EmptyInput,

    /// A range, count or target was degenerate
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

/// Result type for statistics computations
pub type StatsResult<T> = Result<T, StatsError>;

impl StatsError {
    pub(crate) fn invalid_range(message: impl Into<String>) -> Self {
        StatsError::InvalidRange(message.into())
    }
}
