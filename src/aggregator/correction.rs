//! Per-register offset correction.
//!
//! Each register has a fixed calibration constant stored as a
//! two's-complement byte. Correction is `(value + offset) mod 256`.

use crate::parser::Observation;
use crate::utils::config::SarOffsets;
use log::debug;

/// Apply one offset with wrap-around arithmetic
pub fn correct_value(value: u8, offset: u8) -> u8 {
    value.wrapping_add(offset)
}

/// Correct every present register of one observation
///
/// **Public** - pure function, absent registers stay absent
pub fn correct_observation(obs: &Observation, offsets: &SarOffsets) -> Observation {
    let mut corrected = obs.clone();
    for (index, slot) in corrected.registers.iter_mut().enumerate() {
        if let Some(value) = slot {
            *value = correct_value(*value, offsets.get(index));
        }
    }
    corrected
}

/// Correct a batch of observations, preserving order
pub fn correct_all(observations: &[Observation], offsets: &SarOffsets) -> Vec<Observation> {
    debug!("Applying offsets to {} observations", observations.len());
    observations
        .iter()
        .map(|obs| correct_observation(obs, offsets))
        .collect()
}
