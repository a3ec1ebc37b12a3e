//! Session merging of distribution tables.
//!
//! Two tables from repeated measurement sessions are added tick by tick.
//! Statistic rows are never summed: they are dropped on input and
//! recomputed from the merged counts.

use super::schema::{ensure_unique_columns, DistributionTable, LabeledTable, TickTable};
use crate::utils::config::{MAX_TICK, MIN_TICK};
use crate::utils::error::TableError;
use log::debug;
use std::collections::BTreeSet;

/// How to reconcile differing column sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnPolicy {
    /// Result has the union of columns; a missing column counts as zero
    #[default]
    Union,

    /// Differing column sets are a `SchemaMismatch`
    Strict,
}

/// True for bare integer labels like `-12` or `7`
pub fn is_tick_label(label: &str) -> bool {
    let digits = label.strip_prefix('-').unwrap_or(label);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Parse a count cell; empty cells are zero
///
/// Accepts integral float text ("5.0") as written by spreadsheet tools.
pub fn parse_count(cell: &str) -> Result<u64, TableError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(0);
    }

    if let Ok(count) = cell.parse::<u64>() {
        return Ok(count);
    }

    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
            Ok(v as u64)
        }
        _ => Err(TableError::MalformedInput(format!(
            "{:?} is not a non-negative integer count",
            cell
        ))),
    }
}

/// Extract the count rows of a labeled table
///
/// **Public** - rows whose index is not a bare integer (statistic rows,
/// localized labels) are dropped here.
///
/// # Errors
/// * `TableError::MalformedInput` - Bad count cell, repeated tick or column
/// * `TableError::SchemaMismatch` - Tick outside -128..=127
pub fn count_rows(table: &LabeledTable) -> Result<TickTable, TableError> {
    ensure_unique_columns(&table.columns)?;

    let mut counts = TickTable::new(table.columns.clone());
    let mut skipped = 0usize;

    for (label, cells) in &table.rows {
        if !is_tick_label(label) {
            skipped += 1;
            continue;
        }

        let tick: i32 = label
            .parse()
            .map_err(|_| TableError::MalformedInput(format!("tick {} is out of range", label)))?;
        check_tick_domain(tick)?;

        if counts.ticks().any(|t| t == tick) {
            return Err(TableError::MalformedInput(format!(
                "tick {} appears more than once",
                tick
            )));
        }

        let row = cells
            .iter()
            .map(|cell| parse_count(cell))
            .collect::<Result<Vec<_>, _>>()?;
        counts.insert_row(tick, row)?;
    }

    debug!(
        "Kept {} count rows, skipped {} non-tick rows",
        counts.len(),
        skipped
    );

    Ok(counts)
}

/// Add two count tables and recompute statistics
///
/// **Public** - main entry point for session merging
///
/// # Arguments
/// * `first` / `second` - Count tables over the signed tick domain
/// * `policy` - Column reconciliation policy
///
/// # Returns
/// Merged distribution with statistics computed from the summed counts
///
/// # Errors
/// * `TableError::MalformedInput` - A table repeats a column name
/// * `TableError::SchemaMismatch` - Tick outside the signed domain, or
///   differing columns under `ColumnPolicy::Strict`
pub fn merge_tables(
    first: &TickTable,
    second: &TickTable,
    policy: ColumnPolicy,
) -> Result<DistributionTable, TableError> {
    ensure_unique_columns(first.columns())?;
    ensure_unique_columns(second.columns())?;
    for tick in first.ticks().chain(second.ticks()) {
        check_tick_domain(tick)?;
    }

    let columns = merged_columns(first.columns(), second.columns(), policy)?;

    let sources: Vec<(Option<usize>, Option<usize>)> = columns
        .iter()
        .map(|c| (first.column_index(c), second.column_index(c)))
        .collect();

    let ticks: BTreeSet<i32> = first.ticks().chain(second.ticks()).collect();

    let mut merged = TickTable::new(columns);
    for tick in ticks {
        let row = sources
            .iter()
            .map(|&(a, b)| {
                a.map_or(0, |i| first.count(tick, i)) + b.map_or(0, |i| second.count(tick, i))
            })
            .collect();
        merged.insert_row(tick, row)?;
    }

    debug!(
        "Merged {} + {} rows into {} rows over {} columns",
        first.len(),
        second.len(),
        merged.len(),
        merged.columns().len()
    );

    Ok(DistributionTable::from_counts(merged))
}

/// Merge two tables as read from disk
pub fn merge_labeled(
    first: &LabeledTable,
    second: &LabeledTable,
    policy: ColumnPolicy,
) -> Result<DistributionTable, TableError> {
    let first = count_rows(first)?;
    let second = count_rows(second)?;
    merge_tables(&first, &second, policy)
}

fn check_tick_domain(tick: i32) -> Result<(), TableError> {
    if (MIN_TICK..=MAX_TICK).contains(&tick) {
        Ok(())
    } else {
        Err(TableError::SchemaMismatch(format!(
            "tick {} is outside {}..={}",
            tick, MIN_TICK, MAX_TICK
        )))
    }
}

/// Column order: first table's columns, then columns only in the second
fn merged_columns(
    first: &[String],
    second: &[String],
    policy: ColumnPolicy,
) -> Result<Vec<String>, TableError> {
    let extra: Vec<&String> = second.iter().filter(|c| !first.contains(c)).collect();
    let missing: Vec<&String> = first.iter().filter(|c| !second.contains(c)).collect();

    if policy == ColumnPolicy::Strict && (!extra.is_empty() || !missing.is_empty()) {
        return Err(TableError::SchemaMismatch(format!(
            "column sets differ (only in first: {:?}, only in second: {:?})",
            missing, extra
        )));
    }

    let mut columns = first.to_vec();
    columns.extend(extra.into_iter().cloned());
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_labels() {
        assert!(is_tick_label("0"));
        assert!(is_tick_label("-128"));
        assert!(!is_tick_label("-"));
        assert!(!is_tick_label("Average (Vt)"));
        assert!(!is_tick_label("平均值"));
        assert!(!is_tick_label("1.5"));
    }

    #[test]
    fn counts_accept_integral_floats() {
        assert_eq!(parse_count("").unwrap(), 0);
        assert_eq!(parse_count("7").unwrap(), 7);
        assert_eq!(parse_count("5.0").unwrap(), 5);
        assert!(parse_count("2.5").is_err());
        assert!(parse_count("-1").is_err());
        assert!(parse_count("abc").is_err());
    }
}
