//! Layout audit hooks.
//!
//! Each pipeline phase can emit a [`LayoutAuditEvent`] carrying the phase
//! identifier, a few scalar details and a per-row trace of widths and
//! heights. Sinks decide what to do with them: drop, buffer, or forward to a
//! structured [`Logger`]. Auditing never influences layout results.

use std::sync::Mutex;
use std::time::SystemTime;

use serde::Serialize;
use serde_json::{Value, json};

use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};

/// Pipeline checkpoints, in the order a layout run passes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutAuditStage {
    /// Working sizes were reset to the minima.
    Reset,
    /// Initial greedy packing by max row width finished.
    RowsAssignedByMaxWidth,
    /// Pane height was recomputed from the viewport and row minima.
    PaneHeightAdjusted,
    /// Row count, total width and average row width are known.
    RowStatisticsComputed,
    /// Rows were repacked towards the average row width.
    RowsBalanced,
    /// Pull-up fixpoint reached.
    WidgetsPulledUp,
    /// Widths stretched to fill each row.
    WidthsExtended,
    /// Heights equalized per row and leftover space distributed.
    HeightsExtended,
    /// Final coordinates assigned.
    WidgetsPlaced,
}

impl LayoutAuditStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::RowsAssignedByMaxWidth => "rows_assigned_by_max_width",
            Self::PaneHeightAdjusted => "pane_height_adjusted",
            Self::RowStatisticsComputed => "row_statistics_computed",
            Self::RowsBalanced => "rows_balanced",
            Self::WidgetsPulledUp => "widgets_pulled_up",
            Self::WidthsExtended => "widths_extended",
            Self::HeightsExtended => "heights_extended",
            Self::WidgetsPlaced => "widgets_placed",
        }
    }
}

/// Geometry of one row at the moment a stage was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowTrace {
    pub row_no: usize,
    pub row_width: f64,
    pub row_height: f64,
}

#[derive(Debug, Clone)]
pub struct LayoutAuditEvent {
    pub timestamp: SystemTime,
    pub stage: LayoutAuditStage,
    pub details: Vec<(String, Value)>,
    pub rows: Vec<RowTrace>,
}

impl LayoutAuditEvent {
    fn new(stage: LayoutAuditStage) -> Self {
        Self {
            timestamp: SystemTime::now(),
            stage,
            details: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

/// Builder helper to append fields ergonomically.
pub struct LayoutAuditEventBuilder {
    event: LayoutAuditEvent,
}

impl LayoutAuditEventBuilder {
    pub fn new(stage: LayoutAuditStage) -> Self {
        Self {
            event: LayoutAuditEvent::new(stage),
        }
    }

    pub fn detail(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.event.details.push((key.into(), value));
        self
    }

    pub fn rows(&mut self, rows: Vec<RowTrace>) -> &mut Self {
        self.event.rows = rows;
        self
    }

    pub fn finish(self) -> LayoutAuditEvent {
        self.event
    }
}

/// Trait implemented by any audit sink.
pub trait LayoutAudit: Send + Sync {
    /// Disabled sinks let the pipeline skip building events altogether.
    fn enabled(&self) -> bool {
        true
    }

    fn record(&self, event: LayoutAuditEvent);
}

/// Default no-op implementation used when auditing is disabled.
#[derive(Debug, Default)]
pub struct NullLayoutAudit;

impl LayoutAudit for NullLayoutAudit {
    fn enabled(&self) -> bool {
        false
    }

    fn record(&self, _event: LayoutAuditEvent) {}
}

/// Keeps every event in memory until taken.
#[derive(Debug, Default)]
pub struct BufferedLayoutAudit {
    events: Mutex<Vec<LayoutAuditEvent>>,
}

impl BufferedLayoutAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LayoutAuditEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn take(&self) -> Vec<LayoutAuditEvent> {
        self.events
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }

    pub fn stages(&self) -> Vec<LayoutAuditStage> {
        self.events().iter().map(|event| event.stage).collect()
    }
}

impl LayoutAudit for BufferedLayoutAudit {
    fn record(&self, event: LayoutAuditEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

/// Forwards audit events to a structured logger, one line per stage.
pub struct LoggingLayoutAudit {
    logger: Logger,
    level: LogLevel,
    target: String,
}

impl LoggingLayoutAudit {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            level: LogLevel::Debug,
            target: "rowpack::layout.audit".to_string(),
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }
}

impl LayoutAudit for LoggingLayoutAudit {
    fn record(&self, event: LayoutAuditEvent) {
        let mut fields = vec![json_kv("stage", event.stage.as_str())];
        fields.extend(event.details);
        fields.push(json_kv("rows", json!(event.rows)));
        let log_event = event_with_fields(self.level, &self.target, "layout_stage", fields);
        let _ = self.logger.log_event(log_event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_details() {
        let mut builder = LayoutAuditEventBuilder::new(LayoutAuditStage::RowsBalanced);
        builder
            .detail("avg_row_width", json!(90.0))
            .rows(vec![RowTrace {
                row_no: 0,
                row_width: 90.0,
                row_height: 10.0,
            }]);
        let event = builder.finish();
        assert_eq!(event.stage, LayoutAuditStage::RowsBalanced);
        assert_eq!(event.detail("avg_row_width"), Some(&json!(90.0)));
        assert_eq!(event.rows.len(), 1);
    }

    #[test]
    fn buffered_audit_drains() {
        let audit = BufferedLayoutAudit::new();
        audit.record(LayoutAuditEventBuilder::new(LayoutAuditStage::Reset).finish());
        assert_eq!(audit.stages(), vec![LayoutAuditStage::Reset]);
        assert_eq!(audit.take().len(), 1);
        assert!(audit.events().is_empty());
    }

    #[test]
    fn null_audit_is_disabled() {
        assert!(!NullLayoutAudit.enabled());
        assert!(BufferedLayoutAudit::new().enabled());
    }
}
