//! CSV file reader with column kind inference

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::reader::{DataReader, IoError, IoResult};
use crate::schema::{ColumnDescriptor, ColumnKind, DataSchema};

/// Rows sampled for column kind inference
const INFERENCE_ROWS: usize = 100;

/// CSV table held in memory
///
/// The whole file is read once at open time; sketches rarely exceed a few
/// tens of thousands of rows.
pub struct CsvReader {
    path: Option<String>,
    schema: DataSchema,
    records: Vec<csv::StringRecord>,
}

impl CsvReader {
    /// Open a comma-separated file
    pub fn open(path: &str) -> IoResult<Self> {
        Self::open_with_delimiter(path, b',')
    }

    /// Open a delimited file with a header row
    pub fn open_with_delimiter(path: &str, delimiter: u8) -> IoResult<Self> {
        if !Path::new(path).exists() {
            return Err(IoError::FileNotFound(path.to_string()));
        }

        let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        let mut reader = Self::from_reader(BufReader::new(file), delimiter)?;
        reader.path = Some(path.to_string());

        tracing::debug!(
            path,
            rows = reader.schema.row_count,
            columns = reader.schema.columns.len(),
            "opened csv"
        );
        Ok(reader)
    }

    /// Parse delimited text already in memory
    pub fn from_text(text: &str, delimiter: u8) -> IoResult<Self> {
        Self::from_reader(text.as_bytes(), delimiter)
    }

    fn from_reader<R: Read>(source: R, delimiter: u8) -> IoResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| IoError::InvalidFormat(e.to_string()))?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(IoError::InvalidFormat("missing header row".to_string()));
        }

        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| IoError::InvalidFormat(e.to_string()))?;

        let schema = infer_schema(headers, &records);

        Ok(Self {
            path: None,
            schema,
            records,
        })
    }
}

impl DataReader for CsvReader {
    fn schema(&self) -> &DataSchema {
        &self.schema
    }

    fn read_text(&self, name: &str) -> IoResult<Vec<String>> {
        let Some(col_index) = self.schema.position(name) else {
            tracing::warn!(
                column = name,
                numeric = ?self.schema.numeric_columns(),
                "column not in header"
            );
            return Err(IoError::ColumnNotFound(name.to_string()));
        };

        // Short rows read as missing cells.
        Ok(self
            .records
            .iter()
            .map(|record| record.get(col_index).unwrap_or_default().to_string())
            .collect())
    }

    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}

fn infer_schema(headers: Vec<String>, records: &[csv::StringRecord]) -> DataSchema {
    let sampled = &records[..records.len().min(INFERENCE_ROWS)];

    let columns = headers
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let kind = ColumnKind::infer(sampled.iter().map(|r| r.get(i).unwrap_or_default()));
            ColumnDescriptor::new(name, kind)
        })
        .collect();

    DataSchema::new(columns, records.len())
}
