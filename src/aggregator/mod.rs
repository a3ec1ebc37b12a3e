//! Aggregation of parsed observations into tick distributions.
//!
//! This module transforms parsed trace records into:
//! - Offset-corrected observations
//! - Per-channel and combined raw tick histograms
//! - Signed (remapped) tick tables
//! - Frequency-weighted statistics

pub mod correction;
pub mod histogram;
pub mod remap;
pub mod stats;

// Re-export main types and functions
pub use correction::{correct_all, correct_observation, correct_value};
pub use histogram::{build_channel_histograms, ChannelHistograms, RawHistogram};
pub use remap::{remap_histogram, remap_tick, unmap_tick};
pub use stats::{column_statistics, format_stat, weighted_stats, WeightedStats};
