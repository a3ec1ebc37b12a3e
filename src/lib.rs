//! SAR Tick Studio
//!
//! Tick distribution analysis for SAR (Successive-Approximation-Register)
//! comparator trace logs.
//!
//! The pipeline parses raw trace files into per-channel register
//! observations, applies per-register offset corrections, builds tick
//! histograms, remaps them onto signed voltage codes, and annotates them
//! with frequency-weighted statistics. Distribution tables from repeated
//! sessions can be merged, and averages from many measurement stages
//! assembled into a sensor x stage trend matrix.
//!
//! ## Getting Started
//!
//! ```bash
//! sar-tick convert DR3/0p1k/run1.txt
//! sar-tick merge DR3/0p1k/run1_Tick_Distribution.csv DR3/0p1k/run2_Tick_Distribution.csv
//! sar-tick trend DR*/0p1k/Merged_Tick_Distribution_*.csv
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod table;
pub mod timeseries;
pub mod utils;
