//! Sensor x stage matrix of average threshold values.

use super::stage::compare_labels;
use crate::table::LabeledTable;
use crate::utils::config::AVERAGE_ROW_LABEL;
use crate::utils::error::TableError;
use log::{debug, warn};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

static SENSOR_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"S\d+R").expect("sensor pattern is valid"));

/// Read the non-empty "Average (Vt)" cells of a table
///
/// **Public** - only `S<n>R` columns are considered; empty cells are
/// skipped (undefined statistics stay absent).
///
/// # Errors
/// * `TableError::MalformedInput` - No "Average (Vt)" row, or a cell that is
///   not a number
pub fn average_row_values(table: &LabeledTable) -> Result<Vec<(String, f64)>, TableError> {
    let cells = table.row(AVERAGE_ROW_LABEL).ok_or_else(|| {
        TableError::MalformedInput(format!("missing '{}' row", AVERAGE_ROW_LABEL))
    })?;

    let mut values = Vec::new();
    for (column, cell) in table.columns.iter().zip(cells) {
        if !SENSOR_COLUMN.is_match(column) {
            continue;
        }
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        let value: f64 = cell.parse().map_err(|_| {
            TableError::MalformedInput(format!(
                "'{}' value {:?} for {} is not a number",
                AVERAGE_ROW_LABEL, cell, column
            ))
        })?;
        values.push((column.clone(), value));
    }

    Ok(values)
}

/// Accumulates per-stage averages before ordering them into a matrix
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesBuilder {
    cells: BTreeMap<(String, String), f64>,
    seen_stages: BTreeSet<String>,
}

impl TimeSeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one table's averages under a stage label
    ///
    /// A stage seen before is allowed; its cells are overwritten per sensor.
    pub fn add_table(&mut self, stage: &str, table: &LabeledTable) -> Result<(), TableError> {
        let values = average_row_values(table)?;

        if !self.seen_stages.insert(stage.to_string()) {
            warn!(
                "Stage {} supplied more than once; later values replace earlier ones",
                stage
            );
        }

        debug!("Stage {}: {} sensor averages", stage, values.len());
        for (sensor, value) in values {
            self.cells.insert((sensor, stage.to_string()), value);
        }
        Ok(())
    }

    /// Order stages and sensors numerically and freeze the matrix
    pub fn build(self) -> TimeSeriesMatrix {
        let mut sensors: Vec<String> = self
            .cells
            .keys()
            .map(|(sensor, _)| sensor.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut stages: Vec<String> = self
            .cells
            .keys()
            .map(|(_, stage)| stage.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        sensors.sort_by(|a, b| compare_labels(a, b));
        stages.sort_by(|a, b| compare_labels(a, b));

        TimeSeriesMatrix {
            sensors,
            stages,
            cells: self.cells,
        }
    }
}

/// Average Vt per sensor (rows) and stage (columns)
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesMatrix {
    sensors: Vec<String>,
    stages: Vec<String>,
    cells: BTreeMap<(String, String), f64>,
}

impl TimeSeriesMatrix {
    /// Sensor labels in ascending numeric order
    pub fn sensors(&self) -> &[String] {
        &self.sensors
    }

    /// Stage labels in ascending numeric order
    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    pub fn value(&self, sensor: &str, stage: &str) -> Option<f64> {
        self.cells
            .get(&(sensor.to_string(), stage.to_string()))
            .copied()
    }

    /// One row of the matrix, `None` where the stage had no value
    pub fn row(&self, sensor: &str) -> Vec<Option<f64>> {
        self.stages
            .iter()
            .map(|stage| self.value(sensor, stage))
            .collect()
    }

    /// Present points of a sensor as `(stage index, value)`
    pub fn series(&self, sensor: &str) -> Vec<(usize, f64)> {
        self.row(sensor)
            .into_iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i, v)))
            .collect()
    }

    /// Smallest and largest value in the matrix
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells.values().fold(None, |range, &v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Assemble a matrix from `(stage label, table)` pairs in any order
///
/// **Public** - main entry point for trend assembly; fails on the first
/// table without an average row.
pub fn assemble_time_series(
    inputs: &[(String, LabeledTable)],
) -> Result<TimeSeriesMatrix, TableError> {
    let mut builder = TimeSeriesBuilder::new();
    for (stage, table) in inputs {
        builder.add_table(stage, table)?;
    }
    Ok(builder.build())
}
