//! Tests for run planning and the sweep driver, using a stub launcher in
//! place of the real simulator process.

use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use assay_core::config::SweepConfig;
use assay_core::grid::SweepPoint;
use assay_core::report::RunOutcome;
use assay_core::runner::{sweep, RunExternal, RunPlan};
use assay_core::{Error, Result};

/// Config pointed at a scratch build directory under the system temp dir.
fn temp_config(tag: &str) -> SweepConfig {
    let mut config = SweepConfig::new(3);
    config.build_dir =
        std::env::temp_dir().join(format!("assay_sweep_{}_{}", tag, std::process::id()));
    config.simulator = config.default_simulator();
    config
}

/// Launcher stub recording every call; selected points can be made to fail
/// to launch or to exit non-zero.
struct StubLauncher {
    fail_launch_on: Vec<SweepPoint>,
    nonzero_exit_on: Vec<SweepPoint>,
    calls: Vec<SweepPoint>,
}

impl StubLauncher {
    fn ok() -> Self {
        StubLauncher {
            fail_launch_on: Vec::new(),
            nonzero_exit_on: Vec::new(),
            calls: Vec::new(),
        }
    }
}

impl RunExternal for StubLauncher {
    fn run_external(&mut self, plan: &RunPlan, _stdout: File, _stderr: File) -> Result<Option<i32>> {
        self.calls.push(plan.point);
        if self.fail_launch_on.contains(&plan.point) {
            return Err(Error::FailedLaunchingProcess("no such binary".to_string()));
        }
        if self.nonzero_exit_on.contains(&plan.point) {
            return Ok(Some(1));
        }
        Ok(Some(0))
    }
}

#[test]
fn test_run_plan_paths() {
    let mut config = SweepConfig::new(3);
    config.build_dir = PathBuf::from("build");
    let plan = RunPlan::new(
        &config,
        SweepPoint {
            replisomes: 20,
            period: 100,
        },
    );
    assert_eq!(
        plan.run_dir,
        PathBuf::from("build/output_structured_regions/round_3_false_20_100")
    );
    assert_eq!(plan.stdout_path, plan.run_dir.join("simulation_out"));
    assert_eq!(plan.stderr_path, plan.run_dir.join("simulation_err"));
}

#[test]
fn test_run_plan_args() {
    let config = SweepConfig::new(5);
    let plan = RunPlan::new(
        &config,
        SweepPoint {
            replisomes: 40,
            period: 1000,
        },
    );
    let expected: Vec<String> = [
        "--cells",
        "1000",
        "--organism",
        "TcruziCLBrenerEsmeraldo-like",
        "--resources",
        "40",
        "--speed",
        "1",
        "--period",
        "1000",
        "--timeout",
        "10000000",
        "--threads",
        "20",
        "--name",
        "round_5",
        "--output",
        "output_structured_regions",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(plan.args, expected);
}

#[test]
fn test_run_plan_is_deterministic() {
    let config = SweepConfig::new(1);
    let point = SweepPoint {
        replisomes: 10,
        period: 0,
    };
    assert_eq!(RunPlan::new(&config, point), RunPlan::new(&config, point));
}

#[test]
fn test_sweep_continues_past_failing_point() {
    let config = temp_config("fail");
    let mut launcher = StubLauncher::ok();
    launcher.fail_launch_on.push(SweepPoint {
        replisomes: 10,
        period: 0,
    });
    let running = Arc::new(AtomicBool::new(true));

    let summary = sweep(&config, &mut launcher, running);

    assert_eq!(summary.records.len(), 50);
    assert_eq!(launcher.calls.len(), 50);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.succeeded(), 49);
    match &summary.records[0].outcome {
        RunOutcome::LaunchFailed(_) => (),
        other => panic!("unexpected outcome for first point: {:?}", other),
    }
    assert!(!summary.interrupted);
}

#[test]
fn test_sweep_records_nonzero_exit_without_aborting() {
    let config = temp_config("nonzero");
    let mut launcher = StubLauncher::ok();
    let bad_point = SweepPoint {
        replisomes: 50,
        period: 1000,
    };
    launcher.nonzero_exit_on.push(bad_point);
    let running = Arc::new(AtomicBool::new(true));

    let summary = sweep(&config, &mut launcher, running);

    assert_eq!(summary.records.len(), 50);
    assert_eq!(summary.failed(), 1);
    let record = summary
        .records
        .iter()
        .find(|r| r.point == bad_point)
        .unwrap();
    assert_eq!(record.outcome, RunOutcome::Exited(Some(1)));
    assert!(!record.outcome.is_success());
}

#[test]
fn test_sweep_directory_creation_is_idempotent() {
    let config = temp_config("twice");
    let running = Arc::new(AtomicBool::new(true));

    let mut launcher = StubLauncher::ok();
    let first = sweep(&config, &mut launcher, running.clone());
    assert_eq!(first.failed(), 0);

    // the run directories and capture files now exist; a rerun must not
    // trip over them
    let second = sweep(&config, &mut launcher, running);
    assert_eq!(second.failed(), 0);
    for record in &second.records {
        if let RunOutcome::DirSetupFailed(e) = &record.outcome {
            panic!("run dir setup failed on rerun: {}", e);
        }
    }
}

#[test]
fn test_sweep_creates_capture_files() {
    let config = temp_config("files");
    let running = Arc::new(AtomicBool::new(true));
    let mut launcher = StubLauncher::ok();

    sweep(&config, &mut launcher, running);

    let run_dir = config
        .build_dir
        .join("output_structured_regions")
        .join("round_3_false_20_100");
    assert!(run_dir.is_dir());
    assert!(run_dir.join("simulation_out").is_file());
    assert!(run_dir.join("simulation_err").is_file());
}

#[test]
fn test_sweep_stops_on_interrupt() {
    let config = temp_config("stop");
    let mut launcher = StubLauncher::ok();
    let running = Arc::new(AtomicBool::new(false));

    let summary = sweep(&config, &mut launcher, running);

    assert!(summary.interrupted);
    assert!(summary.records.is_empty());
    assert!(launcher.calls.is_empty());
}

#[test]
fn test_unwritable_run_dir_fails_point_but_not_sweep() {
    let mut config = temp_config("blocked");
    // a file where the build dir should be makes every mkdir fail
    std::fs::write(&config.build_dir, b"not a directory").unwrap();
    config.simulator = config.default_simulator();
    let mut launcher = StubLauncher::ok();
    let running = Arc::new(AtomicBool::new(true));

    let summary = sweep(&config, &mut launcher, running);

    assert_eq!(summary.records.len(), 50);
    assert_eq!(summary.failed(), 50);
    assert!(launcher.calls.is_empty());
    for record in &summary.records {
        match &record.outcome {
            RunOutcome::DirSetupFailed(_) => (),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    std::fs::remove_file(&config.build_dir).unwrap();
}
