//! Table shapes shared by the conversion, merge and trend pipelines.

use crate::aggregator::stats::{column_statistics, format_stat, WeightedStats};
use crate::utils::config::{register_labels, AVERAGE_ROW_LABEL, REGISTER_COUNT, STD_ROW_LABEL};
use crate::utils::error::TableError;
use std::collections::{BTreeMap, BTreeSet};

/// Count table keyed by signed tick, one count column per register
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickTable {
    columns: Vec<String>,
    rows: BTreeMap<i32, Vec<u64>>,
}

impl TickTable {
    /// Empty table with the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: BTreeMap::new(),
        }
    }

    /// Table over the S1R..S15R columns from full-width register rows
    pub fn from_register_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (i32, [u64; REGISTER_COUNT])>,
    {
        Self {
            columns: register_labels(),
            rows: rows
                .into_iter()
                .map(|(tick, counts)| (tick, counts.to_vec()))
                .collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Insert or replace one row
    ///
    /// # Errors
    /// * `TableError::MalformedInput` - Row width does not match the column count
    pub fn insert_row(&mut self, tick: i32, counts: Vec<u64>) -> Result<(), TableError> {
        if counts.len() != self.columns.len() {
            return Err(TableError::MalformedInput(format!(
                "tick {} has {} counts, expected {}",
                tick,
                counts.len(),
                self.columns.len()
            )));
        }
        self.rows.insert(tick, counts);
        Ok(())
    }

    /// Count at (tick, column); missing rows count as zero
    pub fn count(&self, tick: i32, column: usize) -> u64 {
        self.rows
            .get(&tick)
            .and_then(|row| row.get(column))
            .copied()
            .unwrap_or(0)
    }

    /// Ticks in ascending order
    pub fn ticks(&self) -> impl Iterator<Item = i32> + '_ {
        self.rows.keys().copied()
    }

    /// Rows in ascending tick order
    pub fn rows(&self) -> impl Iterator<Item = (i32, &[u64])> {
        self.rows.iter().map(|(tick, row)| (*tick, row.as_slice()))
    }

    /// `(tick, count)` pairs of one column in ascending tick order
    pub fn column_pairs(&self, column: usize) -> Vec<(i32, u64)> {
        self.rows
            .iter()
            .map(|(tick, row)| (*tick, row[column]))
            .collect()
    }

    pub fn column_total(&self, column: usize) -> u64 {
        self.rows.values().map(|row| row[column]).sum()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A remapped tick table with its weighted statistics
///
/// This is the canonical on-disk artifact: an "Average (Vt)" row and a
/// "Std (Vt)" row followed by one row per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionTable {
    counts: TickTable,
    stats: Vec<Option<WeightedStats>>,
}

impl DistributionTable {
    /// Attach freshly computed statistics to a count table
    pub fn from_counts(counts: TickTable) -> Self {
        let stats = column_statistics(&counts);
        Self { counts, stats }
    }

    pub fn counts(&self) -> &TickTable {
        &self.counts
    }

    pub fn columns(&self) -> &[String] {
        self.counts.columns()
    }

    /// Statistics per column; `None` for zero-weight columns
    pub fn stats(&self) -> &[Option<WeightedStats>] {
        &self.stats
    }

    /// Statistics for a named column
    pub fn stats_for(&self, column: &str) -> Option<WeightedStats> {
        self.counts
            .column_index(column)
            .and_then(|i| self.stats[i])
    }

    /// Formatted "Average (Vt)" cells
    pub fn average_row(&self) -> Vec<String> {
        self.stats
            .iter()
            .map(|s| format_stat(s.map(|s| s.mean)))
            .collect()
    }

    /// Formatted "Std (Vt)" cells
    pub fn std_row(&self) -> Vec<String> {
        self.stats
            .iter()
            .map(|s| format_stat(s.map(|s| s.std)))
            .collect()
    }

    /// All rows as text, statistic rows first, ready for serialization
    pub fn text_rows(&self) -> Vec<(String, Vec<String>)> {
        let mut rows = Vec::with_capacity(self.counts.len() + 2);
        rows.push((AVERAGE_ROW_LABEL.to_string(), self.average_row()));
        rows.push((STD_ROW_LABEL.to_string(), self.std_row()));
        for (tick, counts) in self.counts.rows() {
            rows.push((
                tick.to_string(),
                counts.iter().map(u64::to_string).collect(),
            ));
        }
        rows
    }
}

/// A table read back from CSV, with the index column kept as text
///
/// Used at the boundary where files may carry statistic rows, localized
/// labels, or other non-tick rows that later stages filter out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabeledTable {
    /// Header of the index column (e.g. "Tick")
    pub index_name: String,

    /// Data column headers
    pub columns: Vec<String>,

    /// `(index, cells)` in file order; cells are padded to the column count
    pub rows: Vec<(String, Vec<String>)>,
}

impl LabeledTable {
    /// Cells of the first row whose index equals `label`
    pub fn row(&self, label: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|(index, _)| index == label)
            .map(|(_, cells)| cells.as_slice())
    }
}

/// Reject a header that names the same column twice
///
/// # Errors
/// * `TableError::MalformedInput` - Repeated column name
pub fn ensure_unique_columns(columns: &[String]) -> Result<(), TableError> {
    let mut seen = BTreeSet::new();
    for column in columns {
        if !seen.insert(column.as_str()) {
            return Err(TableError::MalformedInput(format!(
                "column {:?} appears more than once",
                column
            )));
        }
    }
    Ok(())
}
