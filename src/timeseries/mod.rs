//! Multi-stage trend assembly.
//!
//! Each distribution table contributes its "Average (Vt)" row under a
//! stage label taken from its directory layout. The result is a sensor x
//! stage matrix ordered numerically on both axes.

pub mod matrix;
pub mod stage;

pub use matrix::{assemble_time_series, average_row_values, TimeSeriesBuilder, TimeSeriesMatrix};
pub use stage::{compare_labels, simplify_stage_label, stage_label_for_path};
