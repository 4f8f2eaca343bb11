//! Schema and column types for tabular data

use serde::{Deserialize, Serialize};

/// Header and inferred column kinds of a loaded table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSchema {
    /// In header order
    pub columns: Vec<ColumnDescriptor>,
    /// Data rows, header excluded
    pub row_count: usize,
}

impl DataSchema {
    pub fn new(columns: Vec<ColumnDescriptor>, row_count: usize) -> Self {
        Self { columns, row_count }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Header position of `name`; the first match wins for duplicate headers
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of the columns that look numeric, in header order
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Numeric)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// A header cell and what its column holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        ColumnDescriptor {
            name: name.into(),
            kind,
        }
    }
}

/// What a column mostly contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// At least half of the non-empty cells coerce to numbers
    Numeric,
    /// Mostly free text (categories, labels)
    Text,
    /// No non-empty cells
    Empty,
}

impl ColumnKind {
    /// Infer the kind from a set of cells
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut non_empty = 0usize;
        let mut numeric = 0usize;

        for cell in cells {
            if cell.trim().is_empty() {
                continue;
            }
            non_empty += 1;
            if sketchplot_stats::Sample::parse_lenient(cell).is_some() {
                numeric += 1;
            }
        }

        if non_empty == 0 {
            ColumnKind::Empty
        } else if numeric * 2 >= non_empty {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        }
    }
}
