use crate::output::ConversionSummary;
use crate::utils::config::{load_config, PipelineConfig};
use anyhow::{Context, Result};
use colored::*;
use log::debug;
use std::path::Path;

/// Load the pipeline config, or defaults when no path is given
pub fn load_pipeline_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => {
            debug!("Loading config: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(PipelineConfig::default()),
    }
}

/// Print a human-readable conversion summary to stdout
pub fn print_conversion_summary(summary: &ConversionSummary) {
    println!();
    println!("{}", "SAR TICK DISTRIBUTION SUMMARY".bold());
    println!("  Trace:        {}", summary.input.cyan());
    println!(
        "  Blocks:       {} ({} dropped)",
        summary.total_blocks,
        if summary.dropped_blocks > 0 {
            summary.dropped_blocks.to_string().yellow()
        } else {
            summary.dropped_blocks.to_string().normal()
        }
    );
    println!("  Observations: {}", summary.observations);

    for (channel, count) in &summary.channels {
        println!("    {:<6} {}", channel, count);
    }

    println!();
    println!(
        "  {:<6} {:>8} {:>12} {:>12}",
        "Reg".bold(),
        "Count".bold(),
        "Avg (Vt)".bold(),
        "Std (Vt)".bold()
    );
    for reg in &summary.registers {
        let mean = reg.mean.map(|v| format!("{:.4}", v)).unwrap_or_default();
        let std = reg.std.map(|v| format!("{:.4}", v)).unwrap_or_default();
        println!(
            "  {:<6} {:>8} {:>12} {:>12}",
            reg.label,
            reg.total,
            mean.green(),
            std
        );
    }
    println!();
}

/// Display version information
pub fn display_version() {
    println!("SAR Tick Studio v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "Summary Schema: v{}",
        crate::output::json::SUMMARY_VERSION
    );
    println!();
    println!("Tick distribution, session merging and Vt trend analysis for SAR traces.");
}
