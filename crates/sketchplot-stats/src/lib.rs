//! sketchplot-stats - Descriptive statistics for chart sketches
//!
//! This crate provides the numeric core behind the box plot, histogram,
//! ECDF and strip plot sketches:
//!
//! - **Sample**: finite values extracted from a tabular column
//! - **BoxSummary**: linear-interpolation quantiles, IQR fences, whiskers, outliers
//! - **BinSet**: uniform-width bins with boundary clamping
//! - **Ecdf**: sorted step function with O(log n) nearest-value lookup
//! - **jitter**: stable display offsets derived from `(index, value)`
//!
//! Every result is an immutable value object; nothing here keeps state
//! between calls, so results can be shared freely across threads.

pub mod binning;
pub mod ecdf;
pub mod error;
pub mod jitter;
pub mod sample;
pub mod summary;

pub use binning::*;
pub use ecdf::*;
pub use error::*;
pub use jitter::*;
pub use sample::*;
pub use summary::*;
