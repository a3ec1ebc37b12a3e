//! Trend command implementation.
//! Collects per-stage averages into a sensor x stage matrix and charts it.

use super::models::{TrendArgs, TrendOutputs};
use crate::output::{read_table, render_trend_chart, write_matrix};
use crate::timeseries::{stage_label_for_path, TimeSeriesBuilder};
use crate::utils::config::{TREND_CHART_FILE, TREND_MATRIX_FILE};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Execute the trend command
///
/// The run aborts on the first input that cannot be read or lacks an
/// "Average (Vt)" row; nothing is written in that case. A failed chart
/// leaves no matrix behind, and a failed matrix write removes the chart.
pub fn execute_trend(args: TrendArgs) -> Result<TrendOutputs> {
    let Some(first) = args.inputs.first() else {
        anyhow::bail!("At least one distribution table is required");
    };

    let mut builder = TimeSeriesBuilder::new();
    for path in &args.inputs {
        let absolute = std::path::absolute(path)
            .with_context(|| format!("Failed to resolve {}", path.display()))?;
        let stage = stage_label_for_path(&absolute);
        debug!("{} -> stage {:?}", path.display(), stage);

        let table =
            read_table(path).with_context(|| format!("Failed to read {}", path.display()))?;
        builder
            .add_table(&stage, &table)
            .with_context(|| format!("Invalid distribution table {}", path.display()))?;
    }

    let matrix = builder.build();
    if matrix.is_empty() {
        anyhow::bail!("No sensor averages found in the supplied tables");
    }
    info!(
        "Trend matrix: {} sensors x {} stages ({})",
        matrix.sensors().len(),
        matrix.stages().len(),
        matrix.stages().join(", ")
    );

    let matrix_path = args
        .output
        .clone()
        .unwrap_or_else(|| beside(first, TREND_MATRIX_FILE));

    // A chart failure must leave no matrix behind
    let chart = if args.no_plot {
        None
    } else {
        let chart_path = args
            .chart
            .clone()
            .unwrap_or_else(|| beside(first, TREND_CHART_FILE));
        render_trend_chart(&matrix, &chart_path, &args.chart_config)
            .context("Failed to render trend chart")?;
        info!("✓ Chart saved to: {}", chart_path.display());
        Some(chart_path)
    };

    if let Err(err) = write_matrix(&matrix, &matrix_path) {
        if let Some(chart_path) = &chart {
            if let Err(remove_err) = std::fs::remove_file(chart_path) {
                warn!(
                    "Could not remove chart {}: {}",
                    chart_path.display(),
                    remove_err
                );
            }
        }
        return Err(err).context("Failed to write trend matrix");
    }
    info!("✓ Trend matrix written to: {}", matrix_path.display());

    Ok(TrendOutputs {
        matrix: matrix_path,
        chart,
    })
}

fn beside(file: &Path, name: &str) -> PathBuf {
    match file.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Validate trend arguments
pub fn validate_trend_args(args: &TrendArgs) -> Result<()> {
    if args.inputs.is_empty() {
        anyhow::bail!("At least one distribution table is required");
    }

    for path in &args.inputs {
        if !path.is_file() {
            anyhow::bail!("Distribution table not found: {}", path.display());
        }
    }

    Ok(())
}
