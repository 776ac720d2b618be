use serde::Serialize;
use serde_json::json;

use crate::audit::{LayoutAudit, LayoutAuditEventBuilder, LayoutAuditStage, RowTrace};

use super::core::{FeatureFlags, PaneState, WidgetRecord, compact_row_numbers, row_spans};
use super::extend::{extend_row_heights, extend_widths_to_row, min_used_row_heights, pane_height};
use super::place::place_widgets;
use super::pull_up::{PullUpReport, pull_up_widgets};
use super::rows::{assign_rows_by_average_width, assign_rows_by_max_width, compute_row_statistics};

/// Summary of a completed layout run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PipelineOutcome {
    pub rows: usize,
    pub pane_height: f64,
    pub pull_up: PullUpReport,
}

/// Run every layout phase over `widgets`, in order, updating `pane`.
///
/// Row assignment may leave gaps in the row numbering (a widget wider than
/// the row can open a fresh row behind an empty one), so rows are renumbered
/// after each reassignment. The pane height is settled once rows are final.
pub fn run_pipeline(
    pane: &mut PaneState,
    widgets: &mut [WidgetRecord],
    flags: FeatureFlags,
    audit: &dyn LayoutAudit,
) -> PipelineOutcome {
    let tracer = Tracer { audit };

    reset_working_sizes(widgets);
    tracer.stage(LayoutAuditStage::Reset, widgets, |_| {});

    assign_rows_by_max_width(pane.max_row_width, widgets);
    tracer.stage(LayoutAuditStage::RowsAssignedByMaxWidth, widgets, |b| {
        b.detail("max_row_width", json!(pane.max_row_width));
    });

    adjust_pane_height(pane, widgets);
    tracer.stage(LayoutAuditStage::PaneHeightAdjusted, widgets, |b| {
        b.detail("pane_height", json!(pane.pane_height));
    });

    compute_row_statistics(pane, widgets);
    tracer.stage(LayoutAuditStage::RowStatisticsComputed, widgets, |b| {
        b.detail("no_of_rows", json!(pane.no_of_rows))
            .detail("total_child_width", json!(pane.total_child_width))
            .detail("avg_row_width", json!(pane.avg_row_width));
    });

    if widgets.is_empty() {
        return PipelineOutcome {
            rows: 0,
            pane_height: pane.pane_height,
            pull_up: PullUpReport::default(),
        };
    }

    if flags.balance_rows {
        assign_rows_by_average_width(pane.avg_row_width, pane.max_row_width, widgets);
        pane.no_of_rows = compact_row_numbers(widgets);
        tracer.stage(LayoutAuditStage::RowsBalanced, widgets, |b| {
            b.detail("no_of_rows", json!(pane.no_of_rows));
        });
    }

    let mut pull_up = PullUpReport::default();
    if flags.pull_up_children {
        pull_up = pull_up_widgets(widgets);
        pane.no_of_rows = compact_row_numbers(widgets);
        tracer.stage(LayoutAuditStage::WidgetsPulledUp, widgets, |b| {
            b.detail("iterations", json!(pull_up.iterations))
                .detail("moved", json!(pull_up.moved));
        });
    }

    adjust_pane_height(pane, widgets);

    if flags.extend_child_width {
        extend_widths_to_row(pane.max_row_width, widgets);
        tracer.stage(LayoutAuditStage::WidthsExtended, widgets, |_| {});
    }

    if flags.extend_child_height {
        let unused_height = extend_row_heights(pane.visible_height, widgets);
        tracer.stage(LayoutAuditStage::HeightsExtended, widgets, |b| {
            b.detail("unused_height", json!(unused_height));
        });
    }

    place_widgets(widgets);
    tracer.stage(LayoutAuditStage::WidgetsPlaced, widgets, |b| {
        b.detail("pane_height", json!(pane.pane_height));
    });

    PipelineOutcome {
        rows: pane.no_of_rows,
        pane_height: pane.pane_height,
        pull_up,
    }
}

/// Working sizes restart from the minima on every run.
pub fn reset_working_sizes(widgets: &mut [WidgetRecord]) {
    for widget in widgets.iter_mut() {
        widget.width = widget.min_width;
        widget.height = widget.min_height;
    }
}

fn adjust_pane_height(pane: &mut PaneState, widgets: &[WidgetRecord]) {
    pane.pane_height = pane_height(pane.visible_height, min_used_row_heights(widgets));
}

struct Tracer<'a> {
    audit: &'a dyn LayoutAudit,
}

impl Tracer<'_> {
    fn stage(
        &self,
        stage: LayoutAuditStage,
        widgets: &[WidgetRecord],
        details: impl FnOnce(&mut LayoutAuditEventBuilder),
    ) {
        if !self.audit.enabled() {
            return;
        }
        let mut builder = LayoutAuditEventBuilder::new(stage);
        details(&mut builder);
        builder.rows(row_traces(widgets));
        self.audit.record(builder.finish());
    }
}

fn row_traces(widgets: &[WidgetRecord]) -> Vec<RowTrace> {
    row_spans(widgets)
        .into_iter()
        .map(|span| {
            let row = &widgets[span];
            RowTrace {
                row_no: row[0].row_no,
                row_width: row.iter().map(|w| w.width).sum(),
                row_height: row.iter().fold(0.0, |acc, w| f64::max(acc, w.height)),
            }
        })
        .collect()
}
