use crate::layout::PipelineOutcome;
use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Running counters across layout runs of one engine.
#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    runs: u64,
    widgets_laid_out: u64,
    rows: u64,
    pull_up_iterations: u64,
    widgets_pulled_up: u64,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_run(&mut self, widget_count: usize, outcome: &PipelineOutcome) {
        self.runs = self.runs.saturating_add(1);
        self.widgets_laid_out = self.widgets_laid_out.saturating_add(widget_count as u64);
        self.rows = self.rows.saturating_add(outcome.rows as u64);
        self.pull_up_iterations = self
            .pull_up_iterations
            .saturating_add(outcome.pull_up.iterations as u64);
        self.widgets_pulled_up = self
            .widgets_pulled_up
            .saturating_add(outcome.pull_up.moved as u64);
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            runs: self.runs,
            widgets_laid_out: self.widgets_laid_out,
            rows: self.rows,
            pull_up_iterations: self.pull_up_iterations,
            widgets_pulled_up: self.widgets_pulled_up,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub runs: u64,
    pub widgets_laid_out: u64,
    pub rows: u64,
    pub pull_up_iterations: u64,
    pub widgets_pulled_up: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "layout_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("runs".to_string(), json!(self.runs));
        map.insert("widgets_laid_out".to_string(), json!(self.widgets_laid_out));
        map.insert("rows".to_string(), json!(self.rows));
        map.insert("pull_up_iterations".to_string(), json!(self.pull_up_iterations));
        map.insert("widgets_pulled_up".to_string(), json!(self.widgets_pulled_up));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PullUpReport;

    #[test]
    fn runs_accumulate() {
        let mut metrics = LayoutMetrics::new();
        let outcome = PipelineOutcome {
            rows: 2,
            pane_height: 100.0,
            pull_up: PullUpReport {
                iterations: 2,
                moved: 1,
            },
        };
        metrics.record_run(4, &outcome);
        metrics.record_run(4, &outcome);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.runs, 2);
        assert_eq!(snapshot.widgets_laid_out, 8);
        assert_eq!(snapshot.rows, 4);
        assert_eq!(snapshot.widgets_pulled_up, 2);

        let event = snapshot.to_log_event("rowpack::layout.metrics");
        assert_eq!(event.message, "layout_metrics");
        assert_eq!(event.field("pull_up_iterations"), Some(&json!(4)));
    }
}
