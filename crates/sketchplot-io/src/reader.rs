//! Data reader trait and common types
//!
//! The `DataReader` trait provides a uniform interface for pulling chart
//! inputs out of a table.

use serde::{Deserialize, Serialize};
use sketchplot_stats::Sample;
use thiserror::Error;

use crate::schema::DataSchema;

/// Errors that can occur during I/O operations
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

/// A `(label, value)` row of a grouped chart
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

/// Labeled rows plus the number of rows that were skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledColumn {
    pub rows: Vec<LabeledValue>,
    pub skipped: usize,
}

impl LabeledColumn {
    /// Rows as `(label, value)` tuples
    pub fn pairs(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        self.rows.iter().map(|r| (r.label.clone(), r.value))
    }
}

/// One `(row, column, value)` cell of a cross-tabulated chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossRecord {
    pub row: String,
    pub column: String,
    pub value: f64,
}

/// Trait for reading chart inputs from tabular data
pub trait DataReader: Send + Sync {
    /// Column names, kinds and record count
    fn schema(&self) -> &DataSchema;

    /// Raw cells of a column, one per record
    fn read_text(&self, name: &str) -> IoResult<Vec<String>>;

    /// Read a column as a numeric sample
    ///
    /// Cells that are missing or do not coerce to a finite number are
    /// dropped and counted in [`Sample::dropped`].
    fn read_sample(&self, name: &str) -> IoResult<Sample> {
        let cells = self.read_text(name)?;
        let sample = Sample::from_strs(cells.iter().map(String::as_str));
        if sample.dropped() > 0 {
            tracing::warn!(
                column = name,
                dropped = sample.dropped(),
                kept = sample.len(),
                "skipped non-numeric cells"
            );
        }
        Ok(sample)
    }

    /// Read a label column and a numeric column side by side
    ///
    /// A row is skipped when its label is blank or its value does not
    /// coerce. Labels are trimmed.
    fn read_labeled(&self, label_column: &str, value_column: &str) -> IoResult<LabeledColumn> {
        let labels = self.read_text(label_column)?;
        let values = self.read_text(value_column)?;

        let mut column = LabeledColumn::default();
        for (label, cell) in labels.iter().zip(&values) {
            let label = label.trim();
            match Sample::parse_lenient(cell) {
                Some(value) if !label.is_empty() => column.rows.push(LabeledValue {
                    label: label.to_string(),
                    value,
                }),
                _ => column.skipped += 1,
            }
        }

        if column.skipped > 0 {
            tracing::warn!(
                label_column,
                value_column,
                skipped = column.skipped,
                "skipped incomplete labeled rows"
            );
        }
        Ok(column)
    }

    /// Read three columns as `(row, column, value)` records
    ///
    /// Records with a blank row or column label, or a value that does not
    /// coerce, are skipped.
    fn read_cross(
        &self,
        row_column: &str,
        col_column: &str,
        value_column: &str,
    ) -> IoResult<Vec<CrossRecord>> {
        let rows = self.read_text(row_column)?;
        let cols = self.read_text(col_column)?;
        let values = self.read_text(value_column)?;

        let mut records = Vec::with_capacity(rows.len());
        for ((row, col), cell) in rows.iter().zip(&cols).zip(&values) {
            let (row, col) = (row.trim(), col.trim());
            if row.is_empty() || col.is_empty() {
                continue;
            }
            if let Some(value) = Sample::parse_lenient(cell) {
                records.push(CrossRecord {
                    row: row.to_string(),
                    column: col.to_string(),
                    value,
                });
            }
        }

        let skipped = rows.len() - records.len();
        if skipped > 0 {
            tracing::warn!(
                row_column,
                col_column,
                value_column,
                skipped,
                "skipped incomplete cross rows"
            );
        }
        Ok(records)
    }

    /// Get the file path (if applicable)
    fn path(&self) -> Option<&str> {
        None
    }

    /// Get the format name
    fn format_name(&self) -> &'static str;
}

/// A boxed reader for dynamic dispatch
pub type BoxedReader = Box<dyn DataReader>;

/// Open a file and return an appropriate reader
///
/// The format is auto-detected from the file extension.
pub fn open_file(path: &str) -> IoResult<BoxedReader> {
    let extension = path
        .rsplit('.')
        .next()
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => Ok(Box::new(crate::csv_reader::CsvReader::open(path)?)),
        "tsv" => Ok(Box::new(crate::csv_reader::CsvReader::open_with_delimiter(
            path, b'\t',
        )?)),
        _ => Err(IoError::InvalidFormat(format!(
            "Unknown file extension: {}",
            extension
        ))),
    }
}

/// List supported file extensions
pub fn supported_extensions() -> Vec<&'static str> {
    vec!["csv", "tsv"]
}
