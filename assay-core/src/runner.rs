//! Run planning and the sequential sweep driver.
//!
//! For every grid point the driver resolves a [`RunPlan`], prepares the run
//! directory, then hands the plan to a [`RunExternal`] implementation and
//! blocks until the external process exits. Points are fully independent:
//! no state is shared between them beyond the immutable configuration, and
//! every path is resolved explicitly rather than through the process-wide
//! working directory.

use std::fs::{create_dir_all, File};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::SweepConfig;
use crate::error::{Error, Result};
use crate::grid::{sweep_points, SweepPoint};
use crate::report::{RunOutcome, RunRecord, SweepSummary};
use crate::{OUTPUT_DIR_NAME, STDERR_FILE_NAME, STDOUT_FILE_NAME};

/// Pause between the round announcement and the first run, leaving a moment
/// to abort a sweep started with the wrong round number.
pub const START_DELAY: Duration = Duration::from_secs(3);

/// Fully resolved invocation of the simulator for one sweep point.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub point: SweepPoint,
    /// Directory holding the captured output streams for this run.
    pub run_dir: PathBuf,
    pub stdout_path: PathBuf,
    pub stderr_path: PathBuf,
    /// Argument list handed to the simulator executable.
    pub args: Vec<String>,
}

impl RunPlan {
    /// Lays out paths and arguments for the given point. Deterministic:
    /// the same configuration and point always produce the same plan.
    pub fn new(config: &SweepConfig, point: SweepPoint) -> Self {
        let run_dir = config
            .build_dir
            .join(OUTPUT_DIR_NAME)
            .join(point.dir_name(config.round));
        let stdout_path = run_dir.join(STDOUT_FILE_NAME);
        let stderr_path = run_dir.join(STDERR_FILE_NAME);
        let args = vec![
            "--cells".to_string(),
            config.cells.to_string(),
            "--organism".to_string(),
            config.organism.clone(),
            "--resources".to_string(),
            point.replisomes.to_string(),
            "--speed".to_string(),
            config.speed.to_string(),
            "--period".to_string(),
            point.period.to_string(),
            "--timeout".to_string(),
            config.timeout.to_string(),
            "--threads".to_string(),
            config.threads.to_string(),
            "--name".to_string(),
            format!("round_{}", config.round),
            "--output".to_string(),
            OUTPUT_DIR_NAME.to_string(),
        ];
        RunPlan {
            point,
            run_dir,
            stdout_path,
            stderr_path,
            args,
        }
    }
}

/// Capability for running one external simulator process to completion.
///
/// The driver hands implementations a resolved [`RunPlan`] together with
/// already-opened capture files for the two output streams. Blocks until
/// the process exits and returns its exit code, `None` when the process
/// was terminated by a signal.
pub trait RunExternal {
    fn run_external(&mut self, plan: &RunPlan, stdout: File, stderr: File) -> Result<Option<i32>>;
}

/// Production launcher backed by `std::process::Command`.
///
/// The child's working directory is set to the configured build directory,
/// so the simulator resolves its relative `--output` argument there. No
/// process-wide directory state is touched, and the organism string is
/// passed as a single argv element, so it needs no shell quoting.
pub struct ProcessLauncher {
    simulator: PathBuf,
    build_dir: PathBuf,
}

impl ProcessLauncher {
    pub fn new(config: &SweepConfig) -> Self {
        ProcessLauncher {
            simulator: config.simulator.clone(),
            build_dir: config.build_dir.clone(),
        }
    }
}

impl RunExternal for ProcessLauncher {
    fn run_external(&mut self, plan: &RunPlan, stdout: File, stderr: File) -> Result<Option<i32>> {
        let mut cmd = Command::new(&self.simulator);
        cmd.args(&plan.args);
        cmd.current_dir(&self.build_dir);
        cmd.stdout(Stdio::from(stdout));
        cmd.stderr(Stdio::from(stderr));
        let status = cmd
            .status()
            .map_err(|e| Error::FailedLaunchingProcess(e.to_string()))?;
        Ok(status.code())
    }
}

/// Creates the run directory (idempotent) and opens the capture files.
fn prepare_run_dir(plan: &RunPlan) -> Result<(File, File)> {
    create_dir_all(&plan.run_dir).map_err(|e| {
        Error::FailedPreparingRunDir(plan.run_dir.to_string_lossy().to_string(), e.to_string())
    })?;
    let stdout = File::create(&plan.stdout_path).map_err(|e| {
        Error::FailedPreparingRunDir(plan.stdout_path.to_string_lossy().to_string(), e.to_string())
    })?;
    let stderr = File::create(&plan.stderr_path).map_err(|e| {
        Error::FailedPreparingRunDir(plan.stderr_path.to_string_lossy().to_string(), e.to_string())
    })?;
    Ok((stdout, stderr))
}

/// Announces the round, waits [`START_DELAY`], then executes the sweep.
pub fn run_sweep<L: RunExternal>(
    config: &SweepConfig,
    launcher: &mut L,
    running: Arc<AtomicBool>,
) -> SweepSummary {
    println!("Starting simulations for round {}", config.round);
    thread::sleep(START_DELAY);
    sweep(config, launcher, running)
}

/// Iterates the full grid strictly sequentially, blocking on one external
/// process at a time.
///
/// A failing point is recorded in the summary and skipped over; the sweep
/// itself never aborts on run failures. The `running` flag is checked
/// between points and stops the sweep early when it goes false; the
/// in-flight process is left to finish on its own.
pub fn sweep<L: RunExternal>(
    config: &SweepConfig,
    launcher: &mut L,
    running: Arc<AtomicBool>,
) -> SweepSummary {
    let mut summary = SweepSummary::default();
    for point in sweep_points() {
        if !running.load(Ordering::SeqCst) {
            summary.interrupted = true;
            warn!(
                "interrupt requested, stopping after {} runs",
                summary.records.len()
            );
            break;
        }
        println!(
            "Running for replisomes={} and period={}",
            point.replisomes, point.period
        );
        let plan = RunPlan::new(config, point);
        debug!("run dir: {}", plan.run_dir.to_string_lossy());
        let outcome = match prepare_run_dir(&plan) {
            Ok((stdout, stderr)) => match launcher.run_external(&plan, stdout, stderr) {
                Ok(code) => {
                    if code != Some(0) {
                        warn!(
                            "run for replisomes={} period={} ended with status {:?}",
                            point.replisomes, point.period, code
                        );
                    }
                    RunOutcome::Exited(code)
                }
                Err(e) => {
                    warn!(
                        "failed launching simulator for replisomes={} period={}: {}",
                        point.replisomes, point.period, e
                    );
                    RunOutcome::LaunchFailed(e.to_string())
                }
            },
            Err(e) => {
                error!(
                    "failed preparing run directory for replisomes={} period={}: {}",
                    point.replisomes, point.period, e
                );
                RunOutcome::DirSetupFailed(e.to_string())
            }
        };
        summary.records.push(RunRecord { point, outcome });
    }
    summary
}
