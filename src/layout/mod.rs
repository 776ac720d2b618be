//! Row-packing layout pipeline.
//!
//! The engine in [`crate::engine`] drives these phases through
//! [`run_pipeline`]; each phase is also exported on its own so hosts can
//! compose a custom pass.

mod core;
mod extend;
mod pipeline;
mod place;
mod pull_up;
mod rows;

pub use self::core::{
    FeatureFlags, PaneState, RowSummary, WidgetRecord, compact_row_numbers, row_spans,
    summarize_rows,
};
pub use extend::{extend_row_heights, extend_widths_to_row, min_used_row_heights, pane_height};
pub use pipeline::{PipelineOutcome, reset_working_sizes, run_pipeline};
pub use place::place_widgets;
pub use pull_up::{PullUpReport, pull_up_widgets};
pub use rows::{assign_rows_by_average_width, assign_rows_by_max_width, compute_row_statistics};
