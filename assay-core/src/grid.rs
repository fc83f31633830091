//! Parameter grid for the structured-region assay sweep.
//!
//! Both axes are fixed. Their iteration order is part of the contract:
//! run numbering and logging follow it, so reruns of the same round line
//! up point for point.

/// Transcription periods, the outer sweep axis.
pub const TRANSCRIPTION_PERIODS: [usize; 5] = [0, 100, 1000, 10_000, 100_000];

/// Replisome resource counts, the inner sweep axis.
pub const REPLISOME_COUNTS: [usize; 10] = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

/// Fixed middle token in run directory names. Kept verbatim so new result
/// trees line up with directories produced by earlier runs.
pub const RUN_TAG: &str = "false";

/// One (replisome count, transcription period) pair of the sweep grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepPoint {
    pub replisomes: usize,
    pub period: usize,
}

impl SweepPoint {
    /// Name of the run output directory for this point within a round.
    pub fn dir_name(&self, round: usize) -> String {
        format!(
            "round_{}_{}_{}_{}",
            round, RUN_TAG, self.replisomes, self.period
        )
    }
}

/// Returns the full sweep grid in execution order: periods in the outer
/// loop, replisome counts in the inner loop.
pub fn sweep_points() -> Vec<SweepPoint> {
    let mut points = Vec::with_capacity(TRANSCRIPTION_PERIODS.len() * REPLISOME_COUNTS.len());
    for period in &TRANSCRIPTION_PERIODS {
        for replisomes in &REPLISOME_COUNTS {
            points.push(SweepPoint {
                replisomes: *replisomes,
                period: *period,
            });
        }
    }
    points
}
