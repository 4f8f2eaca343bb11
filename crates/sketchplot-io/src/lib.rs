//! sketchplot-io - Tabular data loading for chart sketches
//!
//! Reads delimited text files with a header row and extracts named
//! columns, either as a numeric [`Sample`](sketchplot_stats::Sample) or as
//! `(label, value)` pairs for grouped charts.
//!
//! # Design
//!
//! Readers implement the `DataReader` trait for uniform access. Rows whose
//! cell does not coerce to a finite number are skipped and counted rather
//! than failing the whole load.

pub mod csv_reader;
pub mod reader;
pub mod schema;

pub use csv_reader::*;
pub use reader::*;
pub use schema::*;
