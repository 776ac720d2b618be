//! Row assignment: greedy max-width packing followed by the optional
//! average-width rebalancing pass.

use super::core::{PaneState, WidgetRecord};

/// Greedy left-to-right packing. A widget wider than the row still gets a row
/// of its own; the first widget never opens a new row.
pub fn assign_rows_by_max_width(max_row_width: f64, widgets: &mut [WidgetRecord]) {
    let mut widgets_on_row_width = 0.0;
    let mut row_no = 0;
    for (idx, widget) in widgets.iter_mut().enumerate() {
        widgets_on_row_width += widget.min_width;
        if widgets_on_row_width > max_row_width && idx > 0 {
            row_no += 1;
            widgets_on_row_width = widget.min_width;
        }
        widget.row_no = row_no;
    }
}

/// Record row count, total minimum width and average row width in `pane`.
/// Row count is taken from the last widget, so rows must already be assigned.
pub fn compute_row_statistics(pane: &mut PaneState, widgets: &[WidgetRecord]) {
    pane.total_child_width = widgets.iter().map(|w| w.min_width).sum();
    match widgets.last() {
        Some(last) => {
            pane.no_of_rows = last.row_no + 1;
            pane.avg_row_width = pane.total_child_width / pane.no_of_rows as f64;
        }
        None => {
            pane.no_of_rows = 0;
            pane.avg_row_width = 0.0;
        }
    }
}

/// Reassign every widget so rows fill up to roughly `avg_row_width` while
/// `max_row_width` stays a hard cap.
///
/// The break target for a widget is computed from the row counter before the
/// overflow rule may bump it. When both rules fire for one widget it ends up
/// alone on the row the overflow opened, and the next widget starts another.
pub fn assign_rows_by_average_width(
    avg_row_width: f64,
    max_row_width: f64,
    widgets: &mut [WidgetRecord],
) {
    let mut total_widgets_width_used = 0.0;
    let mut widget_width_on_row_used = 0.0;
    let mut row_no: usize = 0;
    for widget in widgets.iter_mut() {
        widget_width_on_row_used += widget.min_width;
        total_widgets_width_used += widget.min_width;

        let target = avg_row_width * (row_no + 1) as f64;

        if widget_width_on_row_used > max_row_width {
            widget_width_on_row_used = widget.min_width;
            row_no += 1;
            widget.row_no = row_no;
        }
        if total_widgets_width_used >= target {
            widget.row_no = row_no;
            row_no += 1;
            widget_width_on_row_used = 0.0;
        } else {
            widget.row_no = row_no;
        }
    }
}
