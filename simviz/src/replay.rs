use layout::LayoutDefinition;
use log::warn;
use serde::Serialize;
use simviz_core::{PushOutcome, Sample, TimeSeriesStore, TimeSlider, ValidationError};
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ReplayError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("layout has no component '{0}'")]
    UnknownComponent(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowSelection {
    Shown,
    Range(f64, f64),
    All,
}

#[derive(Debug, Serialize)]
pub struct WindowRow {
    pub t: f64,
    pub values: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub component: String,
    pub samples_pushed: usize,
    pub samples_dropped: usize,
    pub samples_rejected: usize,
    pub latest: Option<Vec<f64>>,
    pub window: Vec<WindowRow>,
}

pub fn load_rows(path: &Path) -> Result<Vec<Sample>, ReplayError> {
    let text = std::fs::read_to_string(path)?;
    parse_rows(&text)
}

/// Parses `t v0 v1 ..` rows; blank lines and `#` comments are skipped.
pub fn parse_rows(text: &str) -> Result<Vec<Sample>, ReplayError> {
    let mut samples = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = Vec::new();
        for field in line.split_whitespace() {
            let value = field.parse::<f64>().map_err(|e| ReplayError::Parse {
                line: idx + 1,
                message: format!("'{field}': {e}"),
            })?;
            fields.push(value);
        }
        let (timestamp, values) = fields.split_first().ok_or_else(|| ReplayError::Parse {
            line: idx + 1,
            message: "empty row".to_string(),
        })?;
        samples.push(Sample::new(*timestamp, values.to_vec()));
    }
    Ok(samples)
}

pub fn replay(
    layout: &LayoutDefinition,
    uid: &str,
    samples: &[Sample],
    selection: WindowSelection,
) -> Result<ReplayReport, ReplayError> {
    let component = layout
        .component(uid)
        .ok_or_else(|| ReplayError::UnknownComponent(uid.to_string()))?;
    let mut store = TimeSeriesStore::from_component(component)?;
    let mut slider = TimeSlider::new(layout.time);
    let mut pushed = 0;
    let mut dropped = 0;
    let mut rejected = 0;

    for sample in samples {
        match store.push(sample.timestamp, &sample.values) {
            Ok(PushOutcome::Dropped) => dropped += 1,
            Ok(PushOutcome::Stored) => {
                pushed += 1;
                slider.advance(sample.timestamp);
                let (current_time, keep_duration) = slider.retention();
                store.trim(current_time, keep_duration);
            }
            Err(err) => {
                warn!("sample at t={} rejected: {err}", sample.timestamp);
                rejected += 1;
            }
        }
    }

    let (start, end) = match selection {
        WindowSelection::Shown => slider.shown_range(),
        WindowSelection::Range(start, end) => (start, end),
        WindowSelection::All => (f64::NEG_INFINITY, f64::INFINITY),
    };
    let window = store
        .query_window(start, end)
        .iter()
        .map(|sample| WindowRow {
            t: sample.timestamp,
            values: sample.values,
        })
        .collect();

    Ok(ReplayReport {
        component: uid.to_string(),
        samples_pushed: pushed,
        samples_dropped: dropped,
        samples_rejected: rejected,
        latest: store.latest(),
        window,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout::{ComponentDefinition, ComponentKind, OrderingPolicy, TimeSettings};

    fn layout() -> LayoutDefinition {
        layout_with(OrderingPolicy::Reject)
    }

    fn layout_with(ordering: OrderingPolicy) -> LayoutDefinition {
        let mut layout = LayoutDefinition::new("test");
        layout.time = TimeSettings {
            shown_time: 1.0,
            kept_time: 2.0,
            dt: 0.001,
        };
        let mut component = ComponentDefinition::new("v", ComponentKind::Value, 1);
        component.synapse = Some(0.0);
        component.ordering = ordering;
        layout.components.push(component);
        layout
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let rows = parse_rows("# t x\n\n0 1.5\n 0.1   2.5 \n").unwrap();
        assert_eq!(
            rows,
            vec![Sample::new(0.0, vec![1.5]), Sample::new(0.1, vec![2.5])]
        );
    }

    #[test]
    fn parse_reports_line_numbers() {
        let err = parse_rows("0 1\n0.1 abc\n").unwrap_err();
        assert!(matches!(err, ReplayError::Parse { line: 2, .. }));
    }

    #[test]
    fn replay_shows_trailing_window() {
        let samples: Vec<Sample> = (0..=40)
            .map(|step| Sample::new(step as f64 * 0.125, vec![step as f64]))
            .collect();
        let report = replay(&layout(), "v", &samples, WindowSelection::Shown).unwrap();
        assert_eq!(report.samples_pushed, 41);
        assert_eq!(report.samples_rejected, 0);
        assert_eq!(report.latest, Some(vec![40.0]));
        let times: Vec<f64> = report.window.iter().map(|row| row.t).collect();
        assert_eq!(times.first().copied(), Some(3.875));
        assert_eq!(times.last().copied(), Some(5.0));
    }

    #[test]
    fn replay_counts_rejected_rows() {
        let samples = vec![
            Sample::new(0.0, vec![1.0]),
            Sample::new(1.0, vec![1.0, 2.0]),
            Sample::new(0.5, vec![3.0]),
        ];
        let report = replay(&layout(), "v", &samples, WindowSelection::All).unwrap();
        assert_eq!(report.samples_pushed, 1);
        assert_eq!(report.samples_rejected, 2);
        assert_eq!(report.window.len(), 1);
    }

    fn rows_then(late: f64) -> Vec<Sample> {
        let mut samples: Vec<Sample> = (0..=5)
            .map(|t| Sample::new(t as f64, vec![t as f64]))
            .collect();
        samples.push(Sample::new(late, vec![late]));
        samples
    }

    #[test]
    fn replay_drop_policy_keeps_slider_at_newest_stored_sample() {
        let layout = layout_with(OrderingPolicy::Drop);
        let report = replay(&layout, "v", &rows_then(1.0), WindowSelection::Shown).unwrap();
        assert_eq!(report.samples_pushed, 6);
        assert_eq!(report.samples_dropped, 1);
        assert_eq!(report.samples_rejected, 0);
        assert_eq!(report.latest, Some(vec![5.0]));
        let times: Vec<f64> = report.window.iter().map(|row| row.t).collect();
        assert_eq!(times, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn replay_rewind_policy_follows_the_rewound_time() {
        let layout = layout_with(OrderingPolicy::Rewind);
        let report = replay(&layout, "v", &rows_then(2.5), WindowSelection::Shown).unwrap();
        assert_eq!(report.samples_pushed, 7);
        assert_eq!(report.samples_dropped, 0);
        assert_eq!(report.latest, Some(vec![2.5]));
        let times: Vec<f64> = report.window.iter().map(|row| row.t).collect();
        assert_eq!(times, vec![2.5]);
    }

    #[test]
    fn replay_unknown_component_fails() {
        let err = replay(&layout(), "missing", &[], WindowSelection::All).unwrap_err();
        assert!(matches!(err, ReplayError::UnknownComponent(uid) if uid == "missing"));
    }
}
