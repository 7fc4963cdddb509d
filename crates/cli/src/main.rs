//! Set-associative cache simulator CLI.
//!
//! This binary replays a Valgrind memory trace against an LRU cache model. It performs:
//! 1. **Argument parsing:** Cache geometry (`-s`, `-E`, `-b`), trace file (`-t`), and output options.
//! 2. **Simulation:** Streams the trace through a `Simulator`, optionally echoing each event's outcome.
//! 3. **Reporting:** Prints `hits:H misses:M evictions:E`, a full report, or JSON, and can write
//!    the cache-lab results file.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use csim_core::SimError;
use csim_core::config::{CacheConfig, SimConfig};
use csim_core::sim::{EventOutcome, Simulator, TraceEvent, TraceReader};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Set-associative LRU cache simulator",
    long_about = "Replay a valgrind memory trace against a set-associative cache with LRU replacement\nand report hit, miss, and eviction counts.\n\nExamples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 8 -E 2 -b 4 -t traces/trans.trace\n  csim -s 5 -E 1 -b 5 -t traces/long.trace --json"
)]
struct Cli {
    /// Number of set index bits (S = 2^s sets).
    #[arg(short = 's', value_name = "NUM")]
    set_bits: u32,

    /// Number of lines per set (associativity).
    #[arg(short = 'E', value_name = "NUM")]
    lines_per_set: usize,

    /// Number of block offset bits (B = 2^b bytes per block).
    #[arg(short = 'b', value_name = "NUM")]
    block_bits: u32,

    /// Valgrind trace to replay.
    #[arg(short = 't', value_name = "FILE")]
    trace: PathBuf,

    /// Print the outcome of every trace event.
    #[arg(short, long)]
    verbose: bool,

    /// Print the full statistics report instead of the summary line.
    #[arg(long, conflicts_with = "json")]
    stats: bool,

    /// Print statistics as JSON instead of the summary line.
    #[arg(long)]
    json: bool,

    /// Also write "<hits> <misses> <evictions>" to this file.
    #[arg(long, value_name = "PATH")]
    results: Option<PathBuf>,

    /// Skip malformed trace lines instead of stopping at the first one.
    #[arg(long)]
    lossy: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "csim_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the simulator, replays the trace, and reports the counters.
fn run(cli: &Cli) -> Result<(), SimError> {
    let config = SimConfig {
        cache: CacheConfig {
            set_bits: cli.set_bits,
            lines_per_set: cli.lines_per_set,
            block_bits: cli.block_bits,
        },
        verbose: cli.verbose,
    };

    let mut sim = Simulator::new(&config)?;
    let trace = TraceReader::open(&cli.trace)?;

    let verbose = cli.verbose;
    let echo = move |event: &TraceEvent, outcome: &EventOutcome| {
        if verbose {
            println!("{event} {outcome}");
        }
    };

    if cli.lossy {
        let skipped = sim.run_lossy_with(trace, echo)?;
        if skipped > 0 {
            eprintln!("warning: skipped {skipped} malformed trace line(s)");
        }
    } else {
        sim.run_with(trace, echo)?;
    }

    let stats = sim.finish();
    if cli.json {
        println!("{}", stats.to_json()?);
    } else if cli.stats {
        stats.print();
    } else {
        println!("{stats}");
    }

    if let Some(path) = &cli.results {
        stats.write_results(path)?;
    }
    Ok(())
}
