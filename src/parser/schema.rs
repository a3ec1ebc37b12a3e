//! Structured records produced by the log parser.

use crate::utils::config::{register_label, REGISTER_COUNT};

/// One SAR-order record: channel plus up to 15 register values
///
/// A register slot is `None` when the record did not carry that register.
/// Absent is never the same as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Channel label from the channel map (e.g. "CH0")
    pub channel: String,

    /// Register values indexed by register number - 1
    pub registers: [Option<u8>; REGISTER_COUNT],

    /// 1-based line number of the marker line in the source trace
    pub line: usize,
}

impl Observation {
    /// Create an observation with every register absent
    pub fn new(channel: impl Into<String>, line: usize) -> Self {
        Self {
            channel: channel.into(),
            registers: [None; REGISTER_COUNT],
            line,
        }
    }

    /// Builder-style setter, mostly for tests and fixtures
    pub fn with_register(mut self, index: usize, value: u8) -> Self {
        self.registers[index] = Some(value);
        self
    }

    /// Value of a register by zero-based index
    pub fn value(&self, index: usize) -> Option<u8> {
        self.registers.get(index).copied().flatten()
    }

    /// Two-digit uppercase hex text of a register, as written in trace files
    pub fn hex(&self, index: usize) -> Option<String> {
        self.value(index).map(|v| format!("{:02X}", v))
    }

    /// Iterate `(label, value)` over present registers
    pub fn present(&self) -> impl Iterator<Item = (String, u8)> + '_ {
        self.registers
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (register_label(i), v)))
    }

    /// Number of registers carrying a value
    pub fn present_count(&self) -> usize {
        self.registers.iter().filter(|v| v.is_some()).count()
    }
}
