//! qcsim Command-Line Interface
//!
//! Runs a QC program file and prints its measurement outcomes.
//!
//! ```text
//! $ qcsim bell.qc --seed 7
//! "00": 262
//! "11": 258
//! "01": 241
//! "10": 239
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{MEASURE_HELP, OutputFormat};
use commands::run;

/// qcsim - run quantum circuit programs on a simulated register
#[derive(Parser)]
#[command(name = "qcsim")]
#[command(author, version, about, long_about = None)]
#[command(after_help = MEASURE_HELP)]
struct Cli {
    /// QC instructions file to be run
    input: PathBuf,

    /// Seed for measurement sampling (random if omitted)
    #[arg(short, long, env = "QCSIM_SEED")]
    seed: Option<u64>,

    /// Output format (text, json)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run::execute(&cli.input, cli.seed, cli.format) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
