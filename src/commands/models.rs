use crate::output::ChartConfig;
use crate::table::ColumnPolicy;
use std::path::PathBuf;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    /// Raw trace text file
    pub input: PathBuf,

    /// Output CSV (defaults to `<stem>_Tick_Distribution.csv` beside the input)
    pub output: Option<PathBuf>,

    /// Optional TOML config with channel map and offsets
    pub config: Option<PathBuf>,

    /// Print a text summary to stdout
    pub print_summary: bool,

    /// Write a JSON run summary to this path
    pub summary_json: Option<PathBuf>,
}

/// Arguments for the merge command
#[derive(Debug, Clone, Default)]
pub struct MergeArgs {
    /// First distribution table; also decides the default output location
    pub first: PathBuf,

    /// Second distribution table
    pub second: PathBuf,

    /// Output CSV (defaults to `Merged_Tick_Distribution_<parent>_<folder>.csv`)
    pub output: Option<PathBuf>,

    /// Column reconciliation policy
    pub column_policy: ColumnPolicy,
}

/// Arguments for the trend command
#[derive(Debug, Clone, Default)]
pub struct TrendArgs {
    /// Distribution tables, in any order
    pub inputs: Vec<PathBuf>,

    /// Output matrix CSV (defaults to beside the first input)
    pub output: Option<PathBuf>,

    /// Output chart PNG (defaults to beside the first input)
    pub chart: Option<PathBuf>,

    /// Skip chart rendering
    pub no_plot: bool,

    /// Chart appearance
    pub chart_config: ChartConfig,
}

/// Files produced by a trend run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendOutputs {
    pub matrix: PathBuf,
    pub chart: Option<PathBuf>,
}
