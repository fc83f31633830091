//! Tests for the end-of-sweep summary.

use assay_core::grid::SweepPoint;
use assay_core::report::{RunOutcome, RunRecord, SweepSummary};

fn record(replisomes: usize, period: usize, outcome: RunOutcome) -> RunRecord {
    RunRecord {
        point: SweepPoint { replisomes, period },
        outcome,
    }
}

#[test]
fn test_summary_counters() {
    let summary = SweepSummary {
        records: vec![
            record(10, 0, RunOutcome::Exited(Some(0))),
            record(20, 0, RunOutcome::Exited(Some(2))),
            record(30, 0, RunOutcome::Exited(None)),
            record(40, 0, RunOutcome::LaunchFailed("gone".to_string())),
        ],
        interrupted: false,
    };
    assert_eq!(summary.succeeded(), 1);
    assert_eq!(summary.failed(), 3);
}

#[test]
fn test_summary_render_lists_failures() {
    let summary = SweepSummary {
        records: vec![
            record(10, 0, RunOutcome::Exited(Some(0))),
            record(20, 100, RunOutcome::Exited(Some(2))),
        ],
        interrupted: false,
    };
    let rendered = summary.render();
    assert!(rendered.contains("Runs attempted: 2"));
    assert!(rendered.contains("Runs succeeded: 1"));
    assert!(rendered.contains("Runs failed: 1"));
    assert!(rendered.contains("replisomes=20 period=100: exit code 2"));
    assert!(!rendered.contains("replisomes=10 period=0"));
}

#[test]
fn test_summary_render_marks_interruption() {
    let summary = SweepSummary {
        records: Vec::new(),
        interrupted: true,
    };
    assert!(summary.render().contains("interrupted"));
}
