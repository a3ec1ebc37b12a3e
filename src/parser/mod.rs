//! Trace parsing and record definitions.
//!
//! This module handles:
//! - Locating SAR-order record blocks in raw trace text
//! - Resolving each block's channel id through the channel map
//! - Extracting S1R..S15R register values

pub mod sar_log;
pub mod schema;

// Re-export main types
pub use sar_log::{parse_log, read_log, ParsedLog};
pub use schema::Observation;
