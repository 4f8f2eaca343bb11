//! Category grouping and aggregation
//!
//! Grouped charts (strip plots, bar and dot plots, heatmaps) start from
//! `(label, value)` rows. Groups keep first-seen order so that every
//! ranking below breaks ties the same way on every render.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use sketchplot_io::CrossRecord;
use sketchplot_stats::Sample;

/// Values grouped by category, in first-seen category order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedSample {
    groups: Vec<Group>,
}

/// One category and its values in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub label: String,
    pub values: Vec<f64>,
}

impl Group {
    /// Sum of the group's values
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// The group's values as a sample
    pub fn sample(&self) -> Sample {
        Sample::from_values(self.values.iter().copied())
    }
}

impl GroupedSample {
    /// Group `(label, value)` rows
    ///
    /// Rows with a blank label or a non-finite value are skipped.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, f64)>) -> Self {
        let mut groups: Vec<Group> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (label, value) in pairs {
            let label = label.trim();
            if label.is_empty() || !value.is_finite() {
                continue;
            }
            match positions.get(label) {
                Some(&pos) => groups[pos].values.push(value),
                None => {
                    positions.insert(label.to_string(), groups.len());
                    groups.push(Group {
                        label: label.to_string(),
                        values: vec![value],
                    });
                }
            }
        }

        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.label == label)
    }

    /// Every value across all groups, as one sample
    pub fn all_values(&self) -> Sample {
        Sample::from_values(self.groups.iter().flat_map(|g| g.values.iter().copied()))
    }

    /// Up to `n` groups with the most values, largest first
    pub fn top_by_count(&self, n: usize) -> Vec<&Group> {
        let mut ranked: Vec<&Group> = self.groups.iter().collect();
        // Stable: equal counts keep first-seen order.
        ranked.sort_by(|a, b| b.values.len().cmp(&a.values.len()));
        ranked.truncate(n);
        ranked
    }

    /// Up to `n` groups with the largest sums, largest first
    pub fn top_by_total(&self, n: usize) -> Vec<&Group> {
        let mut ranked: Vec<&Group> = self.groups.iter().collect();
        ranked.sort_by(|a, b| b.total().total_cmp(&a.total()));
        ranked.truncate(n);
        ranked
    }
}

/// A label and the sum of its values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTotal {
    pub label: String,
    pub total: f64,
}

/// Per-label sums, largest first (bar and dot plots)
pub fn ranked_totals(pairs: impl IntoIterator<Item = (String, f64)>) -> Vec<LabelTotal> {
    let grouped = GroupedSample::from_pairs(pairs);
    grouped
        .top_by_total(grouped.len())
        .into_iter()
        .map(|g| LabelTotal {
            label: g.label.clone(),
            total: g.total(),
        })
        .collect()
}

/// Summed values over a row × column grid
///
/// Rows are the top-N row labels by total, largest first; columns are every
/// column label seen in those rows, sorted ascending. Combinations with no
/// data hold 0 so the grid is complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossTab {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `cells[r][c]` is the sum for `rows[r]`, `columns[c]`
    pub cells: Vec<Vec<f64>>,
}

impl CrossTab {
    /// Sum `records` into a grid of the `top_n_rows` rows with the largest totals
    pub fn sum(records: &[CrossRecord], top_n_rows: usize) -> Self {
        let clean: Vec<&CrossRecord> = records
            .iter()
            .filter(|r| {
                !r.row.trim().is_empty() && !r.column.trim().is_empty() && r.value.is_finite()
            })
            .collect();

        let row_totals =
            GroupedSample::from_pairs(clean.iter().map(|r| (r.row.clone(), r.value)));
        let rows: Vec<String> = row_totals
            .top_by_total(top_n_rows)
            .into_iter()
            .map(|g| g.label.clone())
            .collect();
        let row_pos: HashMap<&str, usize> =
            rows.iter().enumerate().map(|(i, r)| (r.as_str(), i)).collect();

        let kept: Vec<&&CrossRecord> = clean
            .iter()
            .filter(|r| row_pos.contains_key(r.row.trim()))
            .collect();

        let columns: Vec<String> = kept
            .iter()
            .map(|r| r.column.trim().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let col_pos: HashMap<&str, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let mut cells = vec![vec![0.0; columns.len()]; rows.len()];
        for record in kept {
            let r = row_pos[record.row.trim()];
            let c = col_pos[record.column.trim()];
            cells[r][c] += record.value;
        }

        tracing::debug!(rows = rows.len(), columns = columns.len(), "built cross tab");

        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Sum for a `(row, column)` pair
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.rows.iter().position(|x| x == row)?;
        let c = self.columns.iter().position(|x| x == column)?;
        Some(self.cells[r][c])
    }

    /// Largest cell value, 0 for an empty grid
    pub fn max_value(&self) -> f64 {
        self.cells
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(rows: &[(&str, f64)]) -> Vec<(String, f64)> {
        rows.iter().map(|(l, v)| (l.to_string(), *v)).collect()
    }

    #[test]
    fn test_from_pairs_keeps_first_seen_order() {
        let grouped = GroupedSample::from_pairs(pairs(&[
            ("Phones", 1.0),
            ("Laptops", 2.0),
            ("Phones", 3.0),
            ("", 9.0),
            ("Tablets", f64::NAN),
        ]));

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.groups()[0].label, "Phones");
        assert_eq!(grouped.groups()[0].values, vec![1.0, 3.0]);
        assert_eq!(grouped.all_values().len(), 3);
    }

    #[test]
    fn test_top_by_count_is_stable() {
        let grouped = GroupedSample::from_pairs(pairs(&[
            ("A", 1.0),
            ("B", 1.0),
            ("C", 1.0),
            ("C", 1.0),
            ("B", 1.0),
        ]));

        let labels: Vec<&str> = grouped
            .top_by_count(2)
            .iter()
            .map(|g| g.label.as_str())
            .collect();
        assert_eq!(labels, vec!["B", "C"]);
    }

    #[test]
    fn test_ranked_totals() {
        let totals = ranked_totals(pairs(&[("Asus", 10.0), ("MSI", 30.0), ("Asus", 25.0)]));
        assert_eq!(
            totals,
            vec![
                LabelTotal {
                    label: "Asus".to_string(),
                    total: 35.0
                },
                LabelTotal {
                    label: "MSI".to_string(),
                    total: 30.0
                },
            ]
        );
    }

    #[test]
    fn test_cross_tab_fills_missing_cells() {
        let record = |row: &str, column: &str, value: f64| CrossRecord {
            row: row.to_string(),
            column: column.to_string(),
            value,
        };
        let records = vec![
            record("CA", "Phones", 10.0),
            record("CA", "Laptops", 5.0),
            record("NY", "Phones", 4.0),
            record("TX", "Phones", 1.0),
            record("CA", "Phones", 2.0),
        ];

        let tab = CrossTab::sum(&records, 2);
        assert_eq!(tab.rows, vec!["CA", "NY"]);
        assert_eq!(tab.columns, vec!["Laptops", "Phones"]);
        assert_eq!(tab.get("CA", "Phones"), Some(12.0));
        assert_eq!(tab.get("NY", "Laptops"), Some(0.0));
        assert_eq!(tab.get("TX", "Phones"), None);
        assert_eq!(tab.max_value(), 12.0);
    }
}
