//! Merge command implementation.
//! Adds two session distribution tables and recomputes their statistics.

use super::models::MergeArgs;
use crate::output::{read_table, write_distribution};
use crate::table::merge_labeled;
use crate::utils::config::MERGED_PREFIX;
use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

/// Execute the merge command
///
/// # Returns
/// Path of the merged distribution table
pub fn execute_merge(args: MergeArgs) -> Result<PathBuf> {
    let first = read_table(&args.first)
        .with_context(|| format!("Failed to read {}", args.first.display()))?;
    let second = read_table(&args.second)
        .with_context(|| format!("Failed to read {}", args.second.display()))?;

    let merged = merge_labeled(&first, &second, args.column_policy).with_context(|| {
        format!(
            "Failed to merge {} with {}",
            args.first.display(),
            args.second.display()
        )
    })?;

    let output = match &args.output {
        Some(path) => path.clone(),
        None => {
            let first = std::path::absolute(&args.first)
                .with_context(|| format!("Failed to resolve {}", args.first.display()))?;
            merged_output_path(&first)
        }
    };
    write_distribution(&merged, &output).context("Failed to write merged table")?;
    info!("✓ Merged distribution written to: {}", output.display());

    Ok(output)
}

/// `Merged_Tick_Distribution_<parent>_<folder>.csv` in the first input's directory
///
/// `<folder>` is that directory's name and `<parent>` the name of the
/// directory above it; either is empty when the path is too shallow, so
/// callers pass an absolute path.
pub fn merged_output_path(first: &Path) -> PathBuf {
    let folder = first.parent().unwrap_or_else(|| Path::new(""));
    let folder_name = dir_name(Some(folder));
    let parent_name = dir_name(folder.parent());

    folder.join(format!(
        "{}_{}_{}.csv",
        MERGED_PREFIX, parent_name, folder_name
    ))
}

fn dir_name(dir: Option<&Path>) -> String {
    dir.and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Validate merge arguments
pub fn validate_merge_args(args: &MergeArgs) -> Result<()> {
    for path in [&args.first, &args.second] {
        if !path.is_file() {
            anyhow::bail!("Distribution table not found: {}", path.display());
        }
    }
    Ok(())
}
