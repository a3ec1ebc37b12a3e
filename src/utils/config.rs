//! Configuration and constants for the pipeline.
//!
//! Constants describe the trace format and output naming. The injectable
//! parts (channel map, per-register offsets) live in [`PipelineConfig`],
//! which can be loaded from TOML.

use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Marker substring that opens a SAR-order record block
pub const SAR_ORDER_MARKER: &str = "TOP:MinFBC_SAR_order:";

/// Marker substring of the line carrying the channel id
pub const CHANNEL_MARKER: &str = "TOP : Ch=";

/// Number of SAR step registers (S1R..S15R)
pub const REGISTER_COUNT: usize = 15;

/// Number of raw tick bins (8-bit registers)
pub const TICK_COUNT: usize = 256;

// Signed tick domain after remapping
pub const MIN_TICK: i32 = -128;
pub const MAX_TICK: i32 = 127;

/// Label of the weighted-mean statistic row
pub const AVERAGE_ROW_LABEL: &str = "Average (Vt)";

/// Label of the weighted-std statistic row
pub const STD_ROW_LABEL: &str = "Std (Vt)";

/// Header of the first (index) column of a distribution table
pub const TICK_COLUMN_HEADER: &str = "Tick";

/// Header of the first (index) column of a trend matrix
pub const SENSOR_COLUMN_HEADER: &str = "Sensor";

/// Suffix appended to the trace stem for per-file distribution output
pub const DISTRIBUTION_SUFFIX: &str = "_Tick_Distribution.csv";

/// Prefix of merged distribution output files
pub const MERGED_PREFIX: &str = "Merged_Tick_Distribution";

/// Trend matrix file name (written beside the first input)
pub const TREND_MATRIX_FILE: &str = "Sensor_Average_Vt_by_Time.csv";

/// Trend chart file name (written beside the first input)
pub const TREND_CHART_FILE: &str = "Sensor_LinePlot_by_Time.png";

/// Per-register calibration offsets, as two's-complement bytes
pub const DEFAULT_SAR_OFFSETS: [u8; REGISTER_COUNT] = [
    0x03, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFE, 0xFD,
];

/// Default channel code table
pub const DEFAULT_CHANNELS: &[(&str, &str)] =
    &[("00", "CH0"), ("01", "CH1"), ("02", "CH2"), ("03", "CH3")];

/// Register label for a zero-based register index (0 -> "S1R")
pub fn register_label(index: usize) -> String {
    format!("S{}R", index + 1)
}

/// All register labels in order
pub fn register_labels() -> Vec<String> {
    (0..REGISTER_COUNT).map(register_label).collect()
}

/// Zero-pad a channel code to width 2 ("1" -> "01"); wider codes are kept as-is
pub fn normalize_channel_code(code: &str) -> String {
    format!("{:0>2}", code)
}

/// Mapping from channel code (as it appears after `Ch=`) to channel label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct ChannelMap {
    entries: BTreeMap<String, String>,
}

impl ChannelMap {
    /// Build from (code, label) pairs; codes are normalized to width 2
    pub fn new<I, C, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, L)>,
        C: AsRef<str>,
        L: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(code, label)| (normalize_channel_code(code.as_ref()), label.into()))
            .collect();
        Self { entries }
    }

    /// Look up a raw channel id (e.g. "1" or "01")
    pub fn label_for(&self, raw_code: &str) -> Option<&str> {
        self.entries
            .get(&normalize_channel_code(raw_code))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNELS.iter().copied())
    }
}

impl From<BTreeMap<String, String>> for ChannelMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self::new(map)
    }
}

impl From<ChannelMap> for BTreeMap<String, String> {
    fn from(map: ChannelMap) -> Self {
        map.entries
    }
}

/// Per-register offsets applied by the corrector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SarOffsets(pub [u8; REGISTER_COUNT]);

impl SarOffsets {
    /// Build from signed or unsigned values in -128..=255, reduced modulo 256
    pub fn from_signed(values: &[i16]) -> Result<Self, ConfigError> {
        if values.len() != REGISTER_COUNT {
            return Err(ConfigError::InvalidOffsets(format!(
                "expected {} offsets, got {}",
                REGISTER_COUNT,
                values.len()
            )));
        }

        let mut offsets = [0u8; REGISTER_COUNT];
        for (slot, &value) in offsets.iter_mut().zip(values) {
            if !(-128..=255).contains(&value) {
                return Err(ConfigError::InvalidOffsets(format!(
                    "offset {} is outside -128..=255",
                    value
                )));
            }
            *slot = value.rem_euclid(256) as u8;
        }

        Ok(Self(offsets))
    }

    /// Offset for a zero-based register index
    pub fn get(&self, index: usize) -> u8 {
        self.0[index]
    }
}

impl Default for SarOffsets {
    fn default() -> Self {
        Self(DEFAULT_SAR_OFFSETS)
    }
}

/// Injectable pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Channel code table
    pub channels: ChannelMap,

    /// Per-register calibration offsets
    pub offsets: SarOffsets,
}

/// On-disk TOML shape of [`PipelineConfig`]
#[derive(Debug, Clone, Default, Deserialize)]
struct PipelineConfigFile {
    #[serde(default)]
    channels: Option<ChannelMap>,

    #[serde(default)]
    offsets: Option<Vec<i16>>,
}

impl PipelineConfig {
    /// Parse a TOML document; missing sections fall back to defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: PipelineConfigFile = toml::from_str(contents)?;

        let channels = file.channels.unwrap_or_default();
        if channels.is_empty() {
            return Err(ConfigError::InvalidChannels(
                "channel table is empty".to_string(),
            ));
        }

        let offsets = match file.offsets {
            Some(values) => SarOffsets::from_signed(&values)?,
            None => SarOffsets::default(),
        };

        Ok(Self { channels, offsets })
    }
}

/// Load pipeline configuration from a TOML file
///
/// # Errors
/// * `ConfigError::IoError` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::InvalidOffsets` / `InvalidChannels` - If values are out of range
///
/// # Example
/// ```ignore
/// let config = load_config("sar.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PipelineConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    PipelineConfig::from_toml_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_codes_are_zero_padded() {
        let map = ChannelMap::default();
        assert_eq!(map.label_for("1"), Some("CH1"));
        assert_eq!(map.label_for("03"), Some("CH3"));
        assert_eq!(map.label_for("99"), None);
    }

    #[test]
    fn offsets_reduce_modulo_256() {
        let mut values = vec![-1i16; REGISTER_COUNT];
        values[0] = 3;
        values[14] = 0xFD;
        let offsets = SarOffsets::from_signed(&values).unwrap();
        assert_eq!(offsets.get(0), 0x03);
        assert_eq!(offsets.get(1), 0xFF);
        assert_eq!(offsets.get(14), 0xFD);
    }

    #[test]
    fn offsets_reject_wrong_length() {
        assert!(SarOffsets::from_signed(&[1, 2, 3]).is_err());
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = PipelineConfig::from_toml_str(
            r#"
            [channels]
            "7" = "CH7"
            "#,
        )
        .unwrap();
        assert_eq!(config.channels.label_for("07"), Some("CH7"));
        assert_eq!(config.channels.label_for("00"), None);
        assert_eq!(config.offsets, SarOffsets::default());
    }

    #[test]
    fn empty_toml_is_default() {
        let config = PipelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }
}
