//! Public engine owning the widget list and pane state.
//!
//! Hosts append widgets, feed viewport changes in, and read placements back.
//! Every viewport change runs the whole pipeline again; nothing but the
//! widget list and the last viewport survives between runs.

mod config;

pub use config::LayoutConfig;

use std::fmt;
use std::sync::Arc;

use crate::audit::{LayoutAudit, LoggingLayoutAudit, NullLayoutAudit};
use crate::error::{LayoutError, Result};
use crate::geometry::{Placement, Size};
use crate::layout::{
    FeatureFlags, PaneState, PipelineOutcome, RowSummary, WidgetRecord, run_pipeline,
    summarize_rows,
};
use crate::metrics::LayoutMetrics;

/// Handle returned by [`ResponsiveLayout::add`]. Handles issued before a
/// [`ResponsiveLayout::clear`] no longer resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId {
    index: usize,
    generation: u32,
}

impl WidgetId {
    /// Insertion index of the widget.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget#{}.{}", self.index, self.generation)
    }
}

/// Responsive row-packing layout for widgets inside a scrollable pane.
pub struct ResponsiveLayout {
    config: LayoutConfig,
    audit: Arc<dyn LayoutAudit>,
    pane: PaneState,
    widgets: Vec<WidgetRecord>,
    placements: Vec<Placement>,
    committed: Vec<Option<Placement>>,
    generation: u32,
    last_outcome: Option<PipelineOutcome>,
    metrics: LayoutMetrics,
}

impl Default for ResponsiveLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponsiveLayout {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        let audit: Arc<dyn LayoutAudit> = match &config.logger {
            Some(logger) => Arc::new(
                LoggingLayoutAudit::new(logger.clone())
                    .with_level(config.audit_level)
                    .with_target(config.audit_target.clone()),
            ),
            None => Arc::new(NullLayoutAudit),
        };
        Self {
            config,
            audit,
            pane: PaneState::default(),
            widgets: Vec::new(),
            placements: Vec::new(),
            committed: Vec::new(),
            generation: 0,
            last_outcome: None,
            metrics: LayoutMetrics::new(),
        }
    }

    /// Replace the audit sink, e.g. with a buffering one while debugging.
    pub fn set_audit(&mut self, audit: Arc<dyn LayoutAudit>) {
        self.audit = audit;
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Append a widget with the given minimum size. The widget is placed by
    /// the next layout run; until then its placement is zero.
    pub fn add(&mut self, min_width: f64, min_height: f64) -> Result<WidgetId> {
        self.add_record(WidgetRecord::new(min_width, min_height))
    }

    /// Append a caller-prepared record. Only the minima are kept meaningful;
    /// the working fields are rewritten by the next run.
    pub fn add_record(&mut self, record: WidgetRecord) -> Result<WidgetId> {
        validate_minimum("width", record.min_width)?;
        validate_minimum("height", record.min_height)?;

        let id = WidgetId {
            index: self.widgets.len(),
            generation: self.generation,
        };
        self.widgets.push(record);
        self.placements.push(Placement::ZERO);
        self.committed.push(None);
        Ok(id)
    }

    /// Drop all widgets. Previously issued ids stop resolving.
    pub fn clear(&mut self) {
        self.widgets.clear();
        self.placements.clear();
        self.committed.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.pane.max_row_width = sanitize_extent(width);
        self.pane.visible_height = sanitize_extent(height);
        self.layout();
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.pane.max_row_width = sanitize_extent(width);
        self.layout();
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.pane.visible_height = sanitize_extent(height);
        self.layout();
    }

    pub fn viewport(&self) -> Size {
        Size::new(self.pane.max_row_width, self.pane.visible_height)
    }

    /// Toggle optional phases; they apply from the next layout run on.
    pub fn set_flags(
        &mut self,
        balance_rows: bool,
        pull_up_children: bool,
        extend_child_width: bool,
        extend_child_height: bool,
    ) {
        self.set_feature_flags(FeatureFlags {
            balance_rows,
            pull_up_children,
            extend_child_width,
            extend_child_height,
        });
    }

    pub fn set_feature_flags(&mut self, flags: FeatureFlags) {
        self.config.flags = flags;
    }

    pub fn flags(&self) -> FeatureFlags {
        self.config.flags
    }

    /// Run the full pipeline with the current widgets, viewport and flags.
    pub fn layout(&mut self) -> PipelineOutcome {
        let audit = Arc::clone(&self.audit);
        let outcome = run_pipeline(
            &mut self.pane,
            &mut self.widgets,
            self.config.flags,
            audit.as_ref(),
        );

        self.placements.clear();
        self.placements
            .extend(self.widgets.iter().map(WidgetRecord::placement));
        self.metrics.record_run(self.widgets.len(), &outcome);
        self.last_outcome = Some(outcome);

        if self.config.emit_metrics {
            let _ = self.emit_metrics();
        }
        outcome
    }

    /// Log a metrics snapshot through the configured logger, if any.
    pub fn emit_metrics(&self) -> Result<()> {
        if let Some(logger) = &self.config.logger {
            let event = self
                .metrics
                .snapshot()
                .to_log_event(&self.config.metrics_target);
            logger.log_event(event)?;
        }
        Ok(())
    }

    pub fn placement(&self, id: WidgetId) -> Result<Placement> {
        let index = self.resolve(id)?;
        Ok(self.placements[index])
    }

    /// Placements in insertion order, paired with their ids.
    pub fn placements(&self) -> impl Iterator<Item = (WidgetId, Placement)> + '_ {
        let generation = self.generation;
        self.placements
            .iter()
            .enumerate()
            .map(move |(index, placement)| (WidgetId { index, generation }, *placement))
    }

    /// Placements that changed since the previous call, for hosts that only
    /// write back what moved. Widgets never reported before are included.
    pub fn take_dirty(&mut self) -> Vec<(WidgetId, Placement)> {
        let generation = self.generation;
        let mut dirty = Vec::new();
        for (index, (placement, committed)) in self
            .placements
            .iter()
            .zip(self.committed.iter_mut())
            .enumerate()
        {
            if *committed != Some(*placement) {
                *committed = Some(*placement);
                dirty.push((WidgetId { index, generation }, *placement));
            }
        }
        dirty
    }

    pub fn pane_height(&self) -> f64 {
        match self.last_outcome {
            Some(outcome) => outcome.pane_height,
            None => f64::max(self.pane.visible_height, 0.0),
        }
    }

    pub fn pane(&self) -> &PaneState {
        &self.pane
    }

    pub fn widgets(&self) -> &[WidgetRecord] {
        &self.widgets
    }

    pub fn rows(&self) -> Vec<RowSummary> {
        summarize_rows(&self.widgets)
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    fn resolve(&self, id: WidgetId) -> Result<usize> {
        if id.generation == self.generation && id.index < self.widgets.len() {
            Ok(id.index)
        } else {
            Err(LayoutError::WidgetNotFound(id))
        }
    }
}

fn validate_minimum(dimension: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidMinimum { dimension, value })
    }
}

/// Negative or non-finite viewport extents collapse to zero.
fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
