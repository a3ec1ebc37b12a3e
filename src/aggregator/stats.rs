//! Frequency-weighted statistics over tick count columns.
//!
//! Ticks are the sample values and counts are the weights. The standard
//! deviation is the population form (divisor = total weight). Conversion
//! and merge share this routine.

use crate::table::TickTable;

/// Weighted mean and standard deviation of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedStats {
    pub mean: f64,
    pub std: f64,
    pub total_weight: u64,
}

/// Compute weighted statistics from `(tick, count)` pairs
///
/// Returns `None` when the total weight is zero. Undefined is not zero.
pub fn weighted_stats(pairs: &[(i32, u64)]) -> Option<WeightedStats> {
    let (total_weight, weighted_sum) = pairs
        .iter()
        .fold((0u64, 0i128), |(w, s), &(tick, count)| {
            (w + count, s + tick as i128 * count as i128)
        });

    if total_weight == 0 {
        return None;
    }

    let total = total_weight as f64;
    let mean = weighted_sum as f64 / total;

    let squared = pairs.iter().fold(0.0f64, |acc, &(tick, count)| {
        let delta = tick as f64 - mean;
        acc + delta * delta * count as f64
    });

    Some(WeightedStats {
        mean,
        std: (squared / total).sqrt(),
        total_weight,
    })
}

/// Statistics for every column of a tick table
pub fn column_statistics(table: &TickTable) -> Vec<Option<WeightedStats>> {
    (0..table.columns().len())
        .map(|column| weighted_stats(&table.column_pairs(column)))
        .collect()
}

/// Render a statistic with exactly four decimals, or empty when undefined
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => String::new(),
    }
}
