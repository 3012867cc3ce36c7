//! Out-of-order core simulator CLI.
//!
//! Reads an instruction trace (from a file or standard input), runs it through
//! the simulated core and prints the final statistics. It performs:
//! 1. **Configuration:** Built-in defaults, optionally replaced by a JSON file,
//!    then overridden by individual flags.
//! 2. **Simulation:** Streams the trace into the core until it drains.
//! 3. **Report:** Text sections or JSON, plus an optional per-instruction timeline.

mod report;
mod trace;

use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use procsim_core::common::ConfigError;
use procsim_core::{Config, SimError, Simulator};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::report::{Report, TimelineTable};
use crate::trace::{TraceError, TraceReader};

#[derive(Parser, Debug)]
#[command(
    name = "procsim",
    author,
    version,
    about = "Cycle-accurate Tomasulo-style out-of-order core simulator",
    long_about = "Run an instruction trace through a simulated out-of-order core.\n\nTrace lines are `<hex address> <op code> <dest> <src1> <src2>`, with -1 for no register.\n\nExamples:\n  procsim -i traces/gcc.100k.trace\n  procsim -f 8 -j 3 -k 2 -l 1 -r 64 -p 96 < traces/gcc.100k.trace\n  procsim --config machine.json --json -i traces/gcc.100k.trace"
)]
struct Cli {
    /// Dispatch width (instructions admitted per cycle).
    #[arg(short = 'f', long)]
    width: Option<NonZeroUsize>,

    /// Class 0 functional units.
    #[arg(short = 'j', long)]
    k0: Option<NonZeroUsize>,

    /// Class 1 functional units.
    #[arg(short = 'k', long)]
    k1: Option<NonZeroUsize>,

    /// Class 2 functional units.
    #[arg(short = 'l', long)]
    k2: Option<NonZeroUsize>,

    /// Reorder buffer entries.
    #[arg(short = 'r', long)]
    rob: Option<NonZeroUsize>,

    /// Reservation station slots (defaults to the ROB size).
    #[arg(long)]
    rs: Option<NonZeroUsize>,

    /// Renaming-pool physical registers.
    #[arg(short = 'p', long)]
    pregs: Option<NonZeroUsize>,

    /// Trace file; standard input when omitted.
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// JSON configuration used as the base for the flags above.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abort after this many cycles.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Cross-check the machine structures after every cycle.
    #[arg(long)]
    check: bool,

    /// Print statistics as JSON.
    #[arg(long)]
    json: bool,

    /// Print per-instruction dispatch/fire/writeback/retire cycles.
    #[arg(long)]
    timeline: bool,

    /// Log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: ConfigError,
    },

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("trace: {0}")]
    Trace(#[from] TraceError),

    #[error("cannot encode report: {0}")]
    Json(#[from] serde_json::Error),
}

impl Cli {
    /// Base configuration with every flag applied on top.
    fn build_config(&self) -> Result<Config, CliError> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| CliError::Read {
                    path: path.clone(),
                    source,
                })?;
                Config::from_json(&text).map_err(|source| CliError::Config {
                    path: path.clone(),
                    source,
                })?
            }
            None => Config::default(),
        };

        let set = |slot: &mut usize, flag: Option<NonZeroUsize>| {
            if let Some(value) = flag {
                *slot = value.get();
            }
        };
        set(&mut config.pipeline.width, self.width);
        set(&mut config.units.k0, self.k0);
        set(&mut config.units.k1, self.k1);
        set(&mut config.units.k2, self.k2);
        set(&mut config.pipeline.rob_size, self.rob);
        set(&mut config.pipeline.preg_pool, self.pregs);
        if let Some(rs) = self.rs {
            config.pipeline.rs_size = Some(rs.get());
        }
        if self.max_cycles.is_some() {
            config.general.max_cycles = self.max_cycles;
        }
        config.general.record_timeline |= self.timeline;
        config.general.check_invariants |= self.check;
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.build_config()?;
    let input = trace::open_input(cli.input.as_deref()).map_err(|source| CliError::Read {
        path: cli.input.clone().unwrap_or_else(|| PathBuf::from("<stdin>")),
        source,
    })?;
    let mut reader = TraceReader::new(input);

    let mut sim = Simulator::new(&config, &mut reader)?;
    let _ = sim.run()?;
    let stats = sim.finish();
    info!(lines = reader.lines_read(), "trace consumed");

    let report = Report {
        config: &config,
        stats: &stats,
    };
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        if let Some(timeline) = stats.timeline.as_deref() {
            print!("{}", TimelineTable(timeline));
        }
        print!("{report}");
    }

    // A bad line ends the stream early; the partial run is still reported.
    match reader.take_error() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[!] error: {err}");
            ExitCode::FAILURE
        }
    }
}
