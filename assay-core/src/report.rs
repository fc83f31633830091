//! Per-run outcome records and the end-of-sweep summary.

use crate::grid::SweepPoint;

/// What happened to a single sweep point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Simulator process ran and exited; holds its exit code, `None` when
    /// it was terminated by a signal.
    Exited(Option<i32>),
    /// Simulator process could not be launched at all.
    LaunchFailed(String),
    /// Run directory or capture files could not be prepared.
    DirSetupFailed(String),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            RunOutcome::Exited(Some(0)) => true,
            _ => false,
        }
    }
}

/// Outcome of one attempted sweep point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub point: SweepPoint,
    pub outcome: RunOutcome,
}

/// Collected results of a whole sweep.
///
/// Individual run failures never abort the sweep; they end up here and are
/// reported once all points have been visited.
#[derive(Debug, Default)]
pub struct SweepSummary {
    pub records: Vec<RunRecord>,
    /// True when the sweep was stopped early by an interrupt request.
    pub interrupted: bool,
}

impl SweepSummary {
    pub fn succeeded(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome.is_success())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.succeeded()
    }

    /// Renders the summary block printed after the sweep.
    pub fn render(&self) -> String {
        let mut out = format!(
            "\n\
             Sweep summary\n\
             -----------------------------------------\n\
             Runs attempted: {}\n\
             Runs succeeded: {}\n\
             Runs failed: {}\n",
            self.records.len(),
            self.succeeded(),
            self.failed()
        );
        for record in self.records.iter().filter(|r| !r.outcome.is_success()) {
            let reason = match &record.outcome {
                RunOutcome::Exited(Some(code)) => format!("exit code {}", code),
                RunOutcome::Exited(None) => "killed by signal".to_string(),
                RunOutcome::LaunchFailed(e) => format!("launch failed: {}", e),
                RunOutcome::DirSetupFailed(e) => format!("run dir setup failed: {}", e),
            };
            out.push_str(&format!(
                "  replisomes={} period={}: {}\n",
                record.point.replisomes, record.point.period, reason
            ));
        }
        if self.interrupted {
            out.push_str("Sweep was interrupted before completion\n");
        }
        out
    }
}
