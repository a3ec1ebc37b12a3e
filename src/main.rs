//! SAR Tick Studio CLI
//!
//! Converts SAR trace logs into tick distributions, merges sessions,
//! and charts average threshold drift across measurement stages.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use sar_tick_studio::commands::{
    display_version, execute_convert, execute_merge, execute_trend, validate_convert_args,
    validate_merge_args, validate_trend_args, ConvertArgs, MergeArgs, TrendArgs,
};
use sar_tick_studio::output::ChartConfig;
use sar_tick_studio::table::ColumnPolicy;

/// SAR Tick Studio - tick distributions and Vt trends for SAR traces
#[derive(Parser, Debug)]
#[command(name = "sar-tick")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a raw SAR trace into a tick distribution table
    Convert {
        /// Raw trace text file
        input: PathBuf,

        /// Output CSV (default: <stem>_Tick_Distribution.csv beside the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML config with channel map and register offsets
        #[arg(short, long, env = "SAR_TICK_CONFIG")]
        config: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Write a JSON run summary to this path
        #[arg(long)]
        summary_json: Option<PathBuf>,
    },

    /// Merge two session distribution tables
    Merge {
        /// First distribution table (decides the default output folder)
        first: PathBuf,

        /// Second distribution table
        second: PathBuf,

        /// Output CSV (default: Merged_Tick_Distribution_<parent>_<folder>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reject tables whose register columns differ instead of zero-filling
        #[arg(long)]
        strict_columns: bool,
    },

    /// Assemble stage averages into a sensor x stage matrix and chart
    Trend {
        /// Distribution tables located at <DRn...>/<folder>/<file>.csv
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output matrix CSV (default: beside the first input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output chart PNG (default: Sensor_LinePlot_by_Time.png beside the first input)
        #[arg(long)]
        chart: Option<PathBuf>,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Skip chart rendering
        #[arg(long)]
        no_plot: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            summary,
            summary_json,
        } => {
            let args = ConvertArgs {
                input,
                output,
                config,
                print_summary: summary,
                summary_json,
            };

            validate_convert_args(&args)?;
            execute_convert(args)?;
        }

        Commands::Merge {
            first,
            second,
            output,
            strict_columns,
        } => {
            let args = MergeArgs {
                first,
                second,
                output,
                column_policy: if strict_columns {
                    ColumnPolicy::Strict
                } else {
                    ColumnPolicy::Union
                },
            };

            validate_merge_args(&args)?;
            execute_merge(args)?;
        }

        Commands::Trend {
            inputs,
            output,
            chart,
            title,
            no_plot,
        } => {
            let mut chart_config = ChartConfig::new();
            if let Some(title) = title {
                chart_config = chart_config.with_title(title);
            }

            let args = TrendArgs {
                inputs,
                output,
                chart,
                no_plot,
                chart_config,
            };

            validate_trend_args(&args)?;
            execute_trend(args)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
