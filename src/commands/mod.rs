//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod convert;
pub mod merge;
pub mod models;
pub mod trend;
pub mod utils;

// Re-export main command functions
pub use convert::{
    build_distribution, distribution_output_path, execute_convert, validate_convert_args,
};
pub use merge::{execute_merge, merged_output_path, validate_merge_args};
pub use models::{ConvertArgs, MergeArgs, TrendArgs, TrendOutputs};
pub use trend::{execute_trend, validate_trend_args};
pub use utils::{display_version, load_pipeline_config};
