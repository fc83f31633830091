//! Sweep configuration.
//!
//! Configuration is resolved once at program startup and handed to the
//! driver by reference. Values come from three layers, strongest first:
//! explicit command line flags, an optional toml manifest file, and the
//! built-in defaults below.

use std::fs::read;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::{BUILD_DIR_NAME, SIMULATOR_BIN_NAME};

/// Default number of simulated cells per run.
pub const DEFAULT_CELL_COUNT: usize = 1000;
/// Default per-run simulation timeout.
pub const DEFAULT_TIMEOUT: usize = 10_000_000;
/// Default replisome speed.
pub const DEFAULT_SPEED: usize = 1;
/// Default number of threads handed to the simulator.
pub const DEFAULT_THREAD_COUNT: usize = 20;
/// Default target organism.
pub const DEFAULT_ORGANISM: &str = "TcruziCLBrenerEsmeraldo-like";

/// Fully resolved sweep configuration.
///
/// Built once at startup, never mutated afterwards. All numeric fields are
/// passed straight through to the simulator command line.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// Number of simulated cells per run, forwarded as `--cells`.
    pub cells: usize,
    /// Per-run timeout, forwarded as `--timeout`.
    pub timeout: usize,
    /// Replisome speed, forwarded as `--speed`.
    pub speed: usize,
    /// Simulator thread count, forwarded as `--threads`.
    pub threads: usize,
    /// Organism identifier, forwarded as `--organism`.
    pub organism: String,
    /// Number of the round in a series of similar experiments. Namespaces
    /// run directories and the `--name` passed to the simulator.
    pub round: usize,
    /// Directory the simulator binary runs in and writes its outputs under.
    pub build_dir: PathBuf,
    /// Path to the simulator executable.
    pub simulator: PathBuf,
}

impl SweepConfig {
    /// Creates a configuration for the given round with every other field
    /// at its default.
    pub fn new(round: usize) -> Self {
        let build_dir = Path::new(".").join(BUILD_DIR_NAME);
        let simulator = build_dir.join(SIMULATOR_BIN_NAME);
        SweepConfig {
            cells: DEFAULT_CELL_COUNT,
            timeout: DEFAULT_TIMEOUT,
            speed: DEFAULT_SPEED,
            threads: DEFAULT_THREAD_COUNT,
            organism: DEFAULT_ORGANISM.to_string(),
            round,
            build_dir,
            simulator,
        }
    }

    /// Applies every value the manifest sets on top of the current ones.
    /// Fields the manifest leaves out are untouched.
    pub fn apply_manifest(&mut self, manifest: &SweepManifest) {
        if let Some(v) = manifest.cells {
            self.cells = v;
        }
        if let Some(v) = manifest.timeout {
            self.timeout = v;
        }
        if let Some(v) = manifest.speed {
            self.speed = v;
        }
        if let Some(v) = manifest.threads {
            self.threads = v;
        }
        if let Some(ref v) = manifest.organism {
            self.organism = v.clone();
        }
        if let Some(v) = manifest.round {
            self.round = v;
        }
        if let Some(ref v) = manifest.build_dir {
            self.build_dir = v.clone();
        }
        if let Some(ref v) = manifest.simulator {
            self.simulator = v.clone();
        }
    }

    /// Default simulator location inside the current build directory.
    pub fn default_simulator(&self) -> PathBuf {
        self.build_dir.join(SIMULATOR_BIN_NAME)
    }
}

/// Toml mirror of the tunable configuration fields, every field optional.
///
/// ```toml
/// round = 4
/// cells = 500
/// organism = "TcruziCLBrenerEsmeraldo-like"
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SweepManifest {
    pub cells: Option<usize>,
    pub timeout: Option<usize>,
    pub speed: Option<usize>,
    pub threads: Option<usize>,
    pub organism: Option<String>,
    pub round: Option<usize>,
    pub build_dir: Option<PathBuf>,
    pub simulator: Option<PathBuf>,
}

impl SweepManifest {
    /// Reads a manifest from a toml file at the given path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = read(path.as_ref())?;
        let manifest = toml::from_slice(&bytes)?;
        Ok(manifest)
    }
}
