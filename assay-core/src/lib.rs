//! Core library for driving replication-simulator assay sweeps.
//!
//! The sweep itself is a fixed grid: every transcription period from
//! [`grid::TRANSCRIPTION_PERIODS`] is paired with every replisome count from
//! [`grid::REPLISOME_COUNTS`]. For each pair the driver prepares a dedicated
//! run directory under the build directory and invokes the external simulator
//! binary once, capturing its output streams into that directory. The
//! simulator itself is an opaque collaborator, configured entirely through
//! its command line; nothing it writes is parsed here.
//!
//! Entry point is [`runner::run_sweep`], fed with a [`SweepConfig`] built
//! once at startup.

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

// reexports
pub use config::{SweepConfig, SweepManifest};
pub use error::{Error, Result};
pub use grid::SweepPoint;
pub use report::{RunOutcome, RunRecord, SweepSummary};
pub use runner::{ProcessLauncher, RunExternal, RunPlan};

pub mod config;
pub mod error;
pub mod grid;
pub mod report;
pub mod runner;

pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

/// Name of the working directory the simulator binary and its outputs
/// live under.
pub const BUILD_DIR_NAME: &str = "build";
/// Base directory for per-run output, relative to the build directory.
pub const OUTPUT_DIR_NAME: &str = "output_structured_regions";
/// Default name of the simulator executable inside the build directory.
pub const SIMULATOR_BIN_NAME: &str = "simulator";
/// Name of the captured standard output file inside a run directory.
pub const STDOUT_FILE_NAME: &str = "simulation_out";
/// Name of the captured standard error file inside a run directory.
pub const STDERR_FILE_NAME: &str = "simulation_err";
