//! Distribution tables and session merging.
//!
//! A distribution table is the per-file artifact of the conversion
//! pipeline. Two of them can be merged into a new one whose counts are the
//! element-wise sum and whose statistics are recomputed.

pub mod merge;
pub mod schema;

pub use merge::{count_rows, merge_labeled, merge_tables, ColumnPolicy};
pub use schema::{ensure_unique_columns, DistributionTable, LabeledTable, TickTable};
