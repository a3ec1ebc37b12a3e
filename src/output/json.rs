//! JSON run summary for the conversion pipeline.
//!
//! The summary records what a conversion saw: block and drop counts,
//! observations per channel, and per-register weighted statistics.

use crate::parser::ParsedLog;
use crate::table::DistributionTable;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Current summary schema version
pub const SUMMARY_VERSION: &str = "1.0.0";

/// Top-level summary written beside a converted distribution table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionSummary {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file that was converted
    pub input: String,

    /// Marker blocks found in the trace
    pub total_blocks: usize,

    /// Blocks dropped for lack of a mapped channel id
    pub dropped_blocks: usize,

    /// Observations kept
    pub observations: usize,

    /// Observations per channel label
    pub channels: BTreeMap<String, usize>,

    /// Per-register totals and statistics
    pub registers: Vec<RegisterSummary>,

    /// Timestamp when the summary was generated
    pub generated_at: String,
}

/// Counts and statistics for one register column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterSummary {
    pub label: String,
    pub total: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
}

impl ConversionSummary {
    /// Build a summary from a parse result and its distribution table
    pub fn new(input: &Path, parsed: &ParsedLog, table: &DistributionTable) -> Self {
        let registers = table
            .columns()
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let stats = table.stats()[i];
                RegisterSummary {
                    label: label.clone(),
                    total: table.counts().column_total(i),
                    mean: stats.map(|s| s.mean),
                    std: stats.map(|s| s.std),
                }
            })
            .collect();

        Self {
            version: SUMMARY_VERSION.to_string(),
            input: input.display().to_string(),
            total_blocks: parsed.total_blocks,
            dropped_blocks: parsed.dropped_blocks,
            observations: parsed.observations.len(),
            channels: parsed.channel_counts(),
            registers,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Write a summary to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_summary(
    summary: &ConversionSummary,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing summary to: {}", output_path.display());

    super::prepare_output(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)
        .map_err(OutputError::SerializationFailed)?;

    info!(
        "Summary written successfully ({} bytes)",
        super::file_size(output_path)
    );
    Ok(())
}

/// Read a summary back from JSON
pub fn read_summary(input_path: impl AsRef<Path>) -> Result<ConversionSummary, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading summary from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let summary: ConversionSummary =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(summary)
}
