//! Convert command implementation.
//!
//! The convert command:
//! 1. Parses the raw trace into observations
//! 2. Applies per-register offsets
//! 3. Builds per-channel histograms and sums them
//! 4. Remaps ticks to signed codes and computes weighted statistics
//! 5. Writes the distribution table (and optional summaries)

use crate::aggregator::{build_channel_histograms, correct_all, remap_histogram};
use crate::commands::models::ConvertArgs;
use crate::commands::utils::{load_pipeline_config, print_conversion_summary};
use crate::output::{write_distribution, write_summary, ConversionSummary};
use crate::parser::{read_log, ParsedLog};
use crate::table::DistributionTable;
use crate::utils::config::{PipelineConfig, DISTRIBUTION_SUFFIX};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Path of the written distribution table
///
/// # Errors
/// * Config load failures
/// * Trace read/parse errors
/// * File write errors
pub fn execute_convert(args: ConvertArgs) -> Result<PathBuf> {
    let start_time = Instant::now();
    info!("Converting trace: {}", args.input.display());

    let config = load_pipeline_config(args.config.as_deref())?;

    let parsed = read_log(&args.input, &config.channels)
        .with_context(|| format!("Failed to parse trace {}", args.input.display()))?;

    if parsed.dropped_blocks > 0 {
        debug!(
            "{} of {} blocks had no mapped channel id",
            parsed.dropped_blocks, parsed.total_blocks
        );
    }
    if parsed.observations.is_empty() {
        warn!(
            "No observations found in {}; every statistic will be empty",
            args.input.display()
        );
    }

    let table = build_distribution(&parsed, &config);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| distribution_output_path(&args.input));
    write_distribution(&table, &output).context("Failed to write distribution table")?;
    info!("✓ Distribution written to: {}", output.display());

    if args.print_summary || args.summary_json.is_some() {
        let summary = ConversionSummary::new(&args.input, &parsed, &table);

        if let Some(path) = &args.summary_json {
            write_summary(&summary, path).context("Failed to write JSON summary")?;
        }
        if args.print_summary {
            print_conversion_summary(&summary);
        }
    }

    info!(
        "Conversion completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(output)
}

/// Run the in-memory pipeline from parsed observations to a distribution
///
/// **Public** - the file-free core of the convert command
pub fn build_distribution(parsed: &ParsedLog, config: &PipelineConfig) -> DistributionTable {
    let corrected = correct_all(&parsed.observations, &config.offsets);
    let histograms = build_channel_histograms(&corrected);
    debug!(
        "Channels present: {}",
        histograms.channels().collect::<Vec<_>>().join(", ")
    );

    let combined = histograms.combined();
    DistributionTable::from_counts(remap_histogram(&combined))
}

/// `<dir>/<stem>_Tick_Distribution.csv` for a trace at `<dir>/<stem>.<ext>`
pub fn distribution_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = format!("{}{}", stem, DISTRIBUTION_SUFFIX);

    match input.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_convert_args(args: &ConvertArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input trace path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input trace not found: {}", args.input.display());
    }

    if let Some(config) = &args.config {
        if !config.is_file() {
            anyhow::bail!("Config file not found: {}", config.display());
        }
    }

    Ok(())
}
