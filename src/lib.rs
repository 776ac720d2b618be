//! Responsive row-packing layout engine.
//!
//! Widgets with a minimum size are packed into rows that fit the viewport
//! width, rebalanced towards an even row width, compacted, stretched to fill
//! each row and the visible height, and finally given absolute placements
//! inside a scrollable pane. The host toolkit only feeds viewport sizes in
//! and reads placements back out.

pub mod audit;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;

pub use audit::{
    BufferedLayoutAudit, LayoutAudit, LayoutAuditEvent, LayoutAuditEventBuilder,
    LayoutAuditStage, LoggingLayoutAudit, NullLayoutAudit, RowTrace,
};
pub use engine::{LayoutConfig, ResponsiveLayout, WidgetId};
pub use error::{LayoutError, Result};
pub use geometry::{Placement, Size};
pub use layout::{FeatureFlags, PaneState, PipelineOutcome, PullUpReport, RowSummary, WidgetRecord};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{LayoutMetrics, MetricSnapshot};
