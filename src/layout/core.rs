use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::geometry::Placement;

/// Per-widget layout record. Minima are supplied by the caller; every other
/// field is working state rewritten by each layout run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WidgetRecord {
    pub min_width: f64,
    pub min_height: f64,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
    pub row_no: usize,
}

impl WidgetRecord {
    pub fn new(min_width: f64, min_height: f64) -> Self {
        Self {
            min_width,
            min_height,
            width: min_width,
            height: min_height,
            ..Self::default()
        }
    }

    pub fn placement(&self) -> Placement {
        Placement::new(self.x, self.y, self.width, self.height)
    }
}

/// Aggregate geometry for the pane hosting the widgets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PaneState {
    /// Horizontal budget of a row (the viewport width).
    pub max_row_width: f64,
    /// Height of the viewport the pane is scrolled within.
    pub visible_height: f64,
    pub no_of_rows: usize,
    /// Width of all widgets if they were placed on a single row.
    pub total_child_width: f64,
    /// `total_child_width / no_of_rows` as measured after max-width packing.
    pub avg_row_width: f64,
    /// Height applied to the pane (min, pref and max alike).
    pub pane_height: f64,
}

impl PaneState {
    pub fn new(max_row_width: f64, visible_height: f64) -> Self {
        Self {
            max_row_width,
            visible_height,
            ..Self::default()
        }
    }
}

/// Optional pipeline phases. All of them are needed for a fully responsive
/// layout, so everything defaults to on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub balance_rows: bool,
    pub pull_up_children: bool,
    pub extend_child_width: bool,
    pub extend_child_height: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            balance_rows: true,
            pull_up_children: true,
            extend_child_width: true,
            extend_child_height: true,
        }
    }
}

impl FeatureFlags {
    /// Only max-width packing and placement; widgets keep their minimum size.
    pub fn packing_only() -> Self {
        Self {
            balance_rows: false,
            pull_up_children: false,
            extend_child_width: false,
            extend_child_height: false,
        }
    }
}

/// Read-only description of one laid out row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSummary {
    pub row_no: usize,
    /// Insertion indices of the widgets on the row.
    pub widgets: Range<usize>,
    pub min_width: f64,
    pub width: f64,
    pub min_height: f64,
    pub height: f64,
    pub y: f64,
}

/// Contiguous index ranges of widgets sharing a row number, in order.
pub fn row_spans(widgets: &[WidgetRecord]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    for idx in 1..=widgets.len() {
        if idx == widgets.len() || widgets[idx].row_no != widgets[start].row_no {
            spans.push(start..idx);
            start = idx;
        }
    }
    spans
}

/// Renumber rows so they run `0..n` without gaps, keeping every group of
/// widgets that shared a row together. Returns the number of rows.
pub fn compact_row_numbers(widgets: &mut [WidgetRecord]) -> usize {
    let spans = row_spans(widgets);
    for (row_no, span) in spans.iter().enumerate() {
        for widget in &mut widgets[span.clone()] {
            widget.row_no = row_no;
        }
    }
    spans.len()
}

pub fn summarize_rows(widgets: &[WidgetRecord]) -> Vec<RowSummary> {
    row_spans(widgets)
        .into_iter()
        .map(|span| {
            let row = &widgets[span.clone()];
            RowSummary {
                row_no: row[0].row_no,
                widgets: span,
                min_width: row.iter().map(|w| w.min_width).sum(),
                width: row.iter().map(|w| w.width).sum(),
                min_height: row.iter().fold(0.0, |acc, w| f64::max(acc, w.min_height)),
                height: row.iter().fold(0.0, |acc, w| f64::max(acc, w.height)),
                y: row[0].y,
            }
        })
        .collect()
}
