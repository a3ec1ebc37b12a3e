//! Raw tick (0..=255) to signed voltage code (-128..=127) remapping.

use super::histogram::RawHistogram;
use crate::table::TickTable;
use crate::utils::config::{MAX_TICK, MIN_TICK};

/// Map a raw tick to its signed code: 128..=255 become -128..=-1
pub fn remap_tick(raw: u8) -> i32 {
    let raw = raw as i32;
    if raw >= 128 {
        raw - 256
    } else {
        raw
    }
}

/// Inverse of [`remap_tick`]; `None` outside -128..=127
pub fn unmap_tick(tick: i32) -> Option<u8> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return None;
    }
    Some(tick.rem_euclid(256) as u8)
}

/// Relabel a raw histogram onto signed ticks
///
/// **Public** - every one of the 256 raw rows lands on exactly one signed
/// row; the result is ordered -128..=127 with all register columns.
pub fn remap_histogram(raw: &RawHistogram) -> TickTable {
    TickTable::from_register_rows(
        raw.rows()
            .map(|(raw_tick, counts)| (remap_tick(raw_tick), *counts)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_ticks() {
        assert_eq!(remap_tick(0), 0);
        assert_eq!(remap_tick(127), 127);
        assert_eq!(remap_tick(128), -128);
        assert_eq!(remap_tick(255), -1);
        assert_eq!(unmap_tick(-1), Some(255));
        assert_eq!(unmap_tick(128), None);
        assert_eq!(unmap_tick(-129), None);
    }
}
