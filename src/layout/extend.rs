//! Width and height extension plus the pane height derived from row minima.

use super::core::{WidgetRecord, row_spans};

/// Stretch the widgets of each row proportionally to their minimum width so
/// the row adds up to `max_row_width`. Overflowing rows shrink the same way.
pub fn extend_widths_to_row(max_row_width: f64, widgets: &mut [WidgetRecord]) {
    for span in row_spans(widgets) {
        let row = &mut widgets[span];
        let used_row_width: f64 = row.iter().map(|w| w.min_width).sum();
        let unused_row_width = max_row_width - used_row_width;

        if used_row_width > 0.0 {
            for widget in row.iter_mut() {
                widget.width =
                    widget.min_width + unused_row_width * (widget.min_width / used_row_width);
            }
        } else {
            // Only zero-width widgets on the row: share the slack evenly.
            let share = unused_row_width / row.len() as f64;
            for widget in row.iter_mut() {
                widget.width = widget.min_width + share;
            }
        }
    }
}

/// Sum over rows of the tallest minimum height on each row.
pub fn min_used_row_heights(widgets: &[WidgetRecord]) -> f64 {
    row_spans(widgets)
        .into_iter()
        .map(|span| {
            widgets[span]
                .iter()
                .fold(0.0, |acc, w| f64::max(acc, w.min_height))
        })
        .sum()
}

/// Height the pane must take so the scroll container can compute overflow.
pub fn pane_height(visible_height: f64, min_used_row_heights: f64) -> f64 {
    f64::max(visible_height, min_used_row_heights)
}

/// Raise every widget to its row's tallest height, then hand out the vertical
/// space left in the viewport to rows in proportion to their height.
/// Returns the height that was distributed.
pub fn extend_row_heights(visible_height: f64, widgets: &mut [WidgetRecord]) -> f64 {
    let min_used = min_used_row_heights(widgets);
    let unused_height = if visible_height > min_used {
        f64::max(0.0, visible_height - min_used)
    } else {
        0.0
    };

    let spans = row_spans(widgets);
    let row_count = spans.len();
    for span in spans {
        let row = &mut widgets[span];
        let row_max_height = row.iter().fold(0.0, |acc, w| f64::max(acc, w.height));
        let row_extension = if unused_height > 0.0 && min_used > 0.0 {
            unused_height * (row_max_height / min_used)
        } else if unused_height > 0.0 {
            // Every row is zero height; split the space evenly.
            unused_height / row_count as f64
        } else {
            0.0
        };
        let expanded_height = row_max_height + row_extension;
        for widget in row.iter_mut() {
            widget.height = expanded_height;
        }
    }

    unused_height
}
