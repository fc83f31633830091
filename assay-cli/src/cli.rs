//! Application definition.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::{App, Arg, ArgMatches};

use assay_core::config::{SweepConfig, SweepManifest};
use assay_core::runner::{run_sweep, ProcessLauncher};
use assay_core::Error;

pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("assay")
        .version(VERSION)
        .about(
            "Run replication simulator sweeps over structured regions.\n\
             Every (replisome count, transcription period) pair from the \
             fixed grid gets one simulator run with captured output.",
        )
        .arg(
            Arg::with_name("cells")
                .short("n")
                .long("cells")
                .takes_value(true)
                .value_name("int")
                .help("Number of simulations to run [default: 1000]"),
        )
        .arg(
            Arg::with_name("timeout")
                .short("t")
                .long("timeout")
                .takes_value(true)
                .value_name("int")
                .help("Simulation timeout [default: 10000000]"),
        )
        .arg(
            Arg::with_name("threads")
                .short("p")
                .long("threads")
                .takes_value(true)
                .value_name("int")
                .help("Number of threads to use [default: 20]"),
        )
        .arg(
            Arg::with_name("organism")
                .short("o")
                .long("organism")
                .takes_value(true)
                .value_name("string")
                .help("Organism name [default: TcruziCLBrenerEsmeraldo-like]"),
        )
        .arg(
            Arg::with_name("speed")
                .short("s")
                .long("speed")
                .takes_value(true)
                .value_name("int")
                .help("Replisome speed [default: 1]"),
        )
        .arg(
            Arg::with_name("round")
                .short("r")
                .long("round")
                .takes_value(true)
                .value_name("int")
                .help("The number of the round in a series of similar experiments"),
        )
        .arg(
            Arg::with_name("manifest")
                .short("m")
                .long("manifest")
                .takes_value(true)
                .value_name("path")
                .help("Read sweep settings from a toml manifest file"),
        )
        .arg(
            Arg::with_name("build-dir")
                .long("build-dir")
                .takes_value(true)
                .value_name("path")
                .help("Directory containing the simulator and its outputs [default: ./build]"),
        )
        .arg(
            Arg::with_name("simulator")
                .long("simulator")
                .takes_value(true)
                .value_name("path")
                .help("Path to the simulator executable [default: <build-dir>/simulator]"),
        )
        .arg(
            Arg::with_name("verbosity")
                .long("verbosity")
                .short("v")
                .takes_value(true)
                .default_value("warn")
                .value_name("verb")
                .help("Set the verbosity of the log output"),
        )
}

pub fn init() -> ArgMatches<'static> {
    app().get_matches()
}

/// Builds the configuration and runs the sweep.
pub fn start(matches: ArgMatches) -> Result<()> {
    setup_log_verbosity(&matches);

    let config = config_from_matches(&matches)?;
    debug!("sweep config: {:?}", config);

    // stop between sweep points on ctrl-c, leaving the in-flight run alone
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let mut launcher = ProcessLauncher::new(&config);
    let summary = run_sweep(&config, &mut launcher, running);
    println!("{}", summary.render());

    Ok(())
}

/// Resolves the sweep configuration from matches, with precedence:
/// explicit flag, then manifest value, then built-in default.
fn config_from_matches(matches: &ArgMatches) -> Result<SweepConfig> {
    let manifest = match matches.value_of("manifest") {
        Some(path) => SweepManifest::from_path(path)?,
        None => SweepManifest::default(),
    };

    let round = match parse_int_arg(matches, "round")? {
        Some(r) => r,
        None => manifest
            .round
            .ok_or_else(|| Error::MissingConfigValue("round".to_string()))?,
    };

    let mut config = SweepConfig::new(round);
    config.apply_manifest(&manifest);

    if let Some(v) = parse_int_arg(matches, "cells")? {
        config.cells = v;
    }
    if let Some(v) = parse_int_arg(matches, "timeout")? {
        config.timeout = v;
    }
    if let Some(v) = parse_int_arg(matches, "threads")? {
        config.threads = v;
    }
    if let Some(v) = parse_int_arg(matches, "speed")? {
        config.speed = v;
    }
    if let Some(v) = matches.value_of("organism") {
        config.organism = v.to_string();
    }
    if let Some(v) = matches.value_of("build-dir") {
        config.build_dir = PathBuf::from(v);
    }
    match matches.value_of("simulator") {
        Some(v) => config.simulator = PathBuf::from(v),
        None => {
            if manifest.simulator.is_none() {
                config.simulator = config.default_simulator();
            }
        }
    }
    config.round = round;

    Ok(config)
}

/// Parses an optional integer flag, mapping a bad value to a fatal
/// configuration error.
fn parse_int_arg(matches: &ArgMatches, name: &str) -> Result<Option<usize>> {
    match matches.value_of(name) {
        Some(v) => match v.parse::<usize>() {
            Ok(i) => Ok(Some(i)),
            Err(_) => Err(Error::InvalidConfigValue(name.to_string(), v.to_string()).into()),
        },
        None => Ok(None),
    }
}

fn setup_log_verbosity(matches: &ArgMatches) {
    use simplelog::{LevelFilter, TermLogger};
    let level_filter = match matches.value_of("verbosity") {
        Some(s) => match s {
            "0" | "none" => LevelFilter::Off,
            "1" | "err" | "error" | "min" => LevelFilter::Error,
            "2" | "warn" | "warning" | "default" => LevelFilter::Warn,
            "3" | "info" => LevelFilter::Info,
            "4" | "debug" => LevelFilter::Debug,
            "5" | "trace" | "max" | "all" => LevelFilter::Trace,
            _ => LevelFilter::Warn,
        },
        _ => LevelFilter::Warn,
    };
    let mut config_builder = simplelog::ConfigBuilder::new();
    let logger_conf = config_builder
        .set_time_level(LevelFilter::Error)
        .set_target_level(LevelFilter::Debug)
        .set_location_level(LevelFilter::Error)
        .set_time_format_str("%H:%M:%S%.6f")
        .build();
    let _ = TermLogger::init(level_filter, logger_conf, simplelog::TerminalMode::Mixed);
}
