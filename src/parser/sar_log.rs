//! Parser for raw SAR trace logs.
//!
//! A record block starts at a line containing the SAR-order marker. The
//! marker line itself carries the `S<n>R=<hex>` pairs; the channel id is
//! taken from the first `TOP : Ch=<digits>` line between this marker
//! (inclusive) and the next one.

use super::schema::Observation;
use crate::utils::config::{
    register_label, ChannelMap, CHANNEL_MARKER, REGISTER_COUNT, SAR_ORDER_MARKER,
};
use crate::utils::error::ParseError;
use log::debug;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

static REGISTER_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(S\d+R)=(\w+)").expect("register pattern is valid"));

static CHANNEL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Ch=(\d+)").expect("channel pattern is valid"));

/// Result of parsing one trace file
#[derive(Debug, Clone, Default)]
pub struct ParsedLog {
    /// Observations in input order
    pub observations: Vec<Observation>,

    /// Number of marker blocks seen
    pub total_blocks: usize,

    /// Blocks skipped because no mapped channel id was found
    pub dropped_blocks: usize,
}

impl ParsedLog {
    /// Observation count per channel label
    pub fn channel_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for obs in &self.observations {
            *counts.entry(obs.channel.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Read and parse a trace file
///
/// **Public** - main entry point for file input
///
/// Invalid UTF-8 sequences are replaced rather than rejected; trace dumps
/// occasionally carry stray bytes outside the record lines.
pub fn read_log(path: impl AsRef<Path>, channels: &ChannelMap) -> Result<ParsedLog, ParseError> {
    let path = path.as_ref();
    debug!("Reading trace: {}", path.display());

    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    parse_log(&text, channels)
}

/// Parse raw trace text into observations
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `text` - Full trace text
/// * `channels` - Channel code table used to resolve `Ch=` ids
///
/// # Returns
/// Parsed observations plus block/drop counters
///
/// # Errors
/// * `ParseError::InvalidRegisterValue` - A register value is not an 8-bit hex number
pub fn parse_log(text: &str, channels: &ChannelMap) -> Result<ParsedLog, ParseError> {
    let lines: Vec<&str> = text.lines().collect();

    let markers: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.contains(SAR_ORDER_MARKER))
        .map(|(i, _)| i)
        .collect();

    let mut parsed = ParsedLog {
        total_blocks: markers.len(),
        ..ParsedLog::default()
    };

    for (k, &start) in markers.iter().enumerate() {
        let end = markers.get(k + 1).copied().unwrap_or(lines.len());

        let Some(channel) = find_channel(&lines[start..end], channels) else {
            debug!("Dropping block at line {}: no mapped channel id", start + 1);
            parsed.dropped_blocks += 1;
            continue;
        };

        let mut obs = Observation::new(channel, start + 1);
        extract_registers(lines[start], start + 1, &mut obs)?;
        parsed.observations.push(obs);
    }

    debug!(
        "Parsed {} observations from {} blocks ({} dropped)",
        parsed.observations.len(),
        parsed.total_blocks,
        parsed.dropped_blocks
    );

    Ok(parsed)
}

/// Find the first resolvable channel line in a block
///
/// **Private** - internal helper for parse_log
fn find_channel(block: &[&str], channels: &ChannelMap) -> Option<String> {
    block
        .iter()
        .filter(|line| line.contains(CHANNEL_MARKER))
        .find_map(|line| CHANNEL_ID.captures(line))
        .and_then(|caps| channels.label_for(&caps[1]).map(str::to_string))
}

/// Fill register slots from `S<n>R=<hex>` pairs on the marker line
///
/// Only labels spelled exactly `S1R`..`S15R` are kept (`S01R` is not `S1R`).
/// A repeated label keeps the last value.
fn extract_registers(
    line: &str,
    line_no: usize,
    obs: &mut Observation,
) -> Result<(), ParseError> {
    for caps in REGISTER_PAIR.captures_iter(line) {
        let label = &caps[1];
        let Some(index) = (0..REGISTER_COUNT).find(|&i| register_label(i) == label) else {
            continue;
        };

        let text = &caps[2];
        let value =
            u8::from_str_radix(text, 16).map_err(|_| ParseError::InvalidRegisterValue {
                line: line_no,
                label: label.to_string(),
                value: text.to_string(),
            })?;

        obs.registers[index] = Some(value);
    }

    Ok(())
}
