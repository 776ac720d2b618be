//! Layout invariants checked over a deterministic spread of generated inputs.

use rowpack::layout::{min_used_row_heights, row_spans};
use rowpack::{FeatureFlags, ResponsiveLayout, WidgetRecord};

/// Small linear congruential generator so runs are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    fn count(&mut self, max: usize) -> usize {
        1 + (self.next_f64() * max as f64) as usize % max
    }
}

struct Case {
    widgets: Vec<(f64, f64)>,
    width: f64,
    height: f64,
}

fn cases() -> Vec<Case> {
    let mut rng = Lcg(0x5eed);
    (0..300)
        .map(|_| {
            let count = rng.count(24);
            Case {
                widgets: (0..count)
                    .map(|_| (rng.range(5.0, 120.0).round(), rng.range(5.0, 60.0).round()))
                    .collect(),
                width: rng.range(50.0, 400.0).round(),
                height: rng.range(0.0, 500.0).round(),
            }
        })
        .collect()
}

fn run(case: &Case, flags: FeatureFlags) -> ResponsiveLayout {
    let mut layout = ResponsiveLayout::new();
    layout.set_feature_flags(flags);
    for &(w, h) in &case.widgets {
        layout.add(w, h).unwrap();
    }
    layout.set_viewport(case.width, case.height);
    layout
}

fn row_height(row: &[WidgetRecord]) -> f64 {
    row.iter().fold(0.0, |acc, w| f64::max(acc, w.height))
}

#[test]
fn rows_are_contiguous_and_non_empty() {
    for case in cases() {
        let layout = run(&case, FeatureFlags::default());
        let widgets = layout.widgets();
        let spans = row_spans(widgets);
        assert_eq!(spans.len(), layout.pane().no_of_rows);
        for (row_no, span) in spans.into_iter().enumerate() {
            assert!(!span.is_empty());
            assert!(widgets[span].iter().all(|w| w.row_no == row_no));
        }
        assert!(widgets.windows(2).all(|pair| pair[0].row_no <= pair[1].row_no));
    }
}

#[test]
fn extended_rows_fill_viewport_width() {
    for case in cases() {
        let layout = run(&case, FeatureFlags::default());
        let eps = 1e-9 * case.width;
        for span in row_spans(layout.widgets()) {
            let row = &layout.widgets()[span];
            let total: f64 = row.iter().map(|w| w.width).sum();
            assert!((total - case.width).abs() < eps, "row width {total} vs {}", case.width);
            for widget in row {
                assert!(widget.x >= 0.0 && widget.y >= 0.0);
                assert!(widget.x + widget.width <= case.width + eps);
            }
        }
    }
}

#[test]
fn unextended_rows_keep_minimum_widths() {
    let flags = FeatureFlags {
        extend_child_width: false,
        ..FeatureFlags::default()
    };
    for case in cases() {
        let layout = run(&case, flags);
        for widget in layout.widgets() {
            assert_eq!(widget.width, widget.min_width);
        }
    }
}

#[test]
fn rows_share_height_and_fill_viewport() {
    for case in cases() {
        let layout = run(&case, FeatureFlags::default());
        let widgets = layout.widgets();
        let min_used = min_used_row_heights(widgets);
        assert_eq!(layout.pane_height(), f64::max(case.height, min_used));

        let mut y = 0.0;
        let mut total = 0.0;
        for span in row_spans(widgets) {
            let row = &widgets[span];
            let height = row_height(row);
            assert!(row.iter().all(|w| w.height == height));
            assert!((row[0].y - y).abs() < 1e-9 * f64::max(1.0, y));
            y += height;
            total += height;
        }

        if case.height >= min_used {
            assert!((total - case.height).abs() < 1e-9 * f64::max(1.0, case.height));
        } else {
            assert!((total - min_used).abs() < 1e-9 * min_used);
        }
    }
}

#[test]
fn relayout_is_idempotent() {
    for case in cases() {
        let mut layout = run(&case, FeatureFlags::default());
        let first = layout.widgets().to_vec();
        layout.layout();
        assert_eq!(layout.widgets(), first.as_slice());
    }
}

#[test]
fn pull_up_reaches_a_fixpoint() {
    for case in cases() {
        let layout = run(&case, FeatureFlags::default());
        let widgets = layout.widgets();
        let spans = row_spans(widgets);
        // The last row is never judged by the pull-up pass.
        for pair in spans.windows(2).take(spans.len().saturating_sub(2)) {
            let prev: f64 = widgets[pair[0].clone()].iter().map(|w| w.min_width).sum();
            let this: f64 = widgets[pair[1].clone()].iter().map(|w| w.min_width).sum();
            let first = widgets[pair[1].start].min_width;
            assert!(this - prev < first, "row {:?} could still be pulled up", pair[1]);
        }
    }
}
