use serde::Serialize;

use super::core::WidgetRecord;

/// Outcome of the pull-up fixpoint loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PullUpReport {
    /// Passes over the widget list, including the final pass that moved nothing.
    pub iterations: usize,
    /// Widgets moved to the previous row across all passes.
    pub moved: usize,
}

/// Repeatedly move the first widget of a row into the previous row while the
/// row is wider than its predecessor by at least that widget's minimum width.
///
/// A row is judged when the next row starts, so the last row is never pulled
/// from. Row numbers are expected to be contiguous on entry.
pub fn pull_up_widgets(widgets: &mut [WidgetRecord]) -> PullUpReport {
    let mut report = PullUpReport::default();
    if widgets.is_empty() {
        return report;
    }

    loop {
        report.iterations += 1;
        let mut pulled_up = 0;

        let mut prev_row_width = f64::INFINITY;
        let mut this_row_width = 0.0;
        let mut this_row_no = 0;
        let mut first_on_row = 0;

        for idx in 0..widgets.len() {
            if widgets[idx].row_no == this_row_no {
                this_row_width += widgets[idx].min_width;
                continue;
            }

            let row_diff = this_row_width - prev_row_width;
            let first = &mut widgets[first_on_row];
            if row_diff >= first.min_width && first.row_no > 0 {
                first.row_no -= 1;
                pulled_up += 1;
            }

            first_on_row = idx;
            prev_row_width = this_row_width;
            this_row_width = widgets[idx].min_width;
            this_row_no += 1;
        }

        report.moved += pulled_up;
        if pulled_up == 0 {
            return report;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widgets(entries: &[(f64, usize)]) -> Vec<WidgetRecord> {
        entries.iter()
            .map(|&(min_width, row_no)| WidgetRecord {
                row_no,
                ..WidgetRecord::new(min_width, 10.0)
            })
            .collect()
    }

    fn rows(widgets: &[WidgetRecord]) -> Vec<usize> {
        widgets.iter().map(|w| w.row_no).collect()
    }

    #[test]
    fn wide_row_donates_first_widget() {
        let mut w = widgets(&[(10.0, 0), (20.0, 1), (30.0, 1), (5.0, 2)]);
        let report = pull_up_widgets(&mut w);
        assert_eq!(rows(&w), vec![0, 0, 1, 2]);
        assert_eq!(report, PullUpReport { iterations: 2, moved: 1 });
    }

    #[test]
    fn balanced_rows_are_left_alone() {
        let mut w = widgets(&[(30.0, 0), (30.0, 0), (30.0, 1), (30.0, 1)]);
        let report = pull_up_widgets(&mut w);
        assert_eq!(rows(&w), vec![0, 0, 1, 1]);
        assert_eq!(report, PullUpReport { iterations: 1, moved: 0 });
    }

    #[test]
    fn last_row_is_never_judged() {
        let mut w = widgets(&[(10.0, 0), (50.0, 1), (50.0, 1)]);
        let report = pull_up_widgets(&mut w);
        assert_eq!(rows(&w), vec![0, 1, 1]);
        assert_eq!(report.moved, 0);
    }

    #[test]
    fn empty_input_is_a_noop() {
        assert_eq!(pull_up_widgets(&mut []), PullUpReport::default());
    }
}
