//! Raw tick histograms over the unsigned register domain.
//!
//! Every histogram is a dense 256 x 15 table. Missing ticks are zero,
//! never skipped, so summing histograms is a plain element-wise add.

use crate::parser::Observation;
use crate::utils::config::{REGISTER_COUNT, TICK_COUNT};
use log::debug;
use std::collections::BTreeMap;

/// Dense count table indexed by raw tick (0..=255) and register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHistogram {
    counts: Vec<[u64; REGISTER_COUNT]>,
}

impl RawHistogram {
    /// Zero-filled histogram over all 256 ticks
    pub fn new() -> Self {
        Self {
            counts: vec![[0; REGISTER_COUNT]; TICK_COUNT],
        }
    }

    /// Count every present register value of one observation
    pub fn record(&mut self, obs: &Observation) {
        for (index, value) in obs.registers.iter().enumerate() {
            if let Some(tick) = value {
                self.counts[*tick as usize][index] += 1;
            }
        }
    }

    /// Element-wise add another histogram into this one
    pub fn add(&mut self, other: &RawHistogram) {
        for (row, other_row) in self.counts.iter_mut().zip(&other.counts) {
            for (count, other_count) in row.iter_mut().zip(other_row) {
                *count += other_count;
            }
        }
    }

    pub fn count(&self, tick: u8, register: usize) -> u64 {
        self.counts[tick as usize][register]
    }

    /// Sum of one register column over all ticks
    pub fn column_total(&self, register: usize) -> u64 {
        self.counts.iter().map(|row| row[register]).sum()
    }

    /// Iterate rows as `(raw_tick, counts)`
    pub fn rows(&self) -> impl Iterator<Item = (u8, &[u64; REGISTER_COUNT])> {
        self.counts
            .iter()
            .enumerate()
            .map(|(tick, row)| (tick as u8, row))
    }
}

impl Default for RawHistogram {
    fn default() -> Self {
        Self::new()
    }
}

/// Histograms keyed by channel label
#[derive(Debug, Clone, Default)]
pub struct ChannelHistograms {
    per_channel: BTreeMap<String, RawHistogram>,
}

impl ChannelHistograms {
    pub fn get(&self, channel: &str) -> Option<&RawHistogram> {
        self.per_channel.get(channel)
    }

    /// Channel labels that had at least one observation
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.per_channel.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.per_channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.per_channel.is_empty()
    }

    /// Sum all per-channel histograms into one
    ///
    /// **Public** - produces the combined histogram used for output
    pub fn combined(&self) -> RawHistogram {
        let mut combined = RawHistogram::new();
        for histogram in self.per_channel.values() {
            combined.add(histogram);
        }
        combined
    }
}

/// Build one raw histogram per channel from corrected observations
///
/// **Public** - main entry point for histogram construction
///
/// A channel gets a zero-filled histogram as soon as it has one
/// observation, even when that observation has no register values.
pub fn build_channel_histograms(observations: &[Observation]) -> ChannelHistograms {
    let mut per_channel: BTreeMap<String, RawHistogram> = BTreeMap::new();

    for obs in observations {
        per_channel
            .entry(obs.channel.clone())
            .or_default()
            .record(obs);
    }

    debug!(
        "Built histograms for {} channels from {} observations",
        per_channel.len(),
        observations.len()
    );

    ChannelHistograms { per_channel }
}
