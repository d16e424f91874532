//! Shared helpers for loading programs and rendering outcomes.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use qcsim_lang::{MeasurementOutcome, Program, build};
use qcsim_syntax::parse;

/// Help text describing what each form of `measure` prints.
pub const MEASURE_HELP: &str = "\
Output:
  measure()   prints one sampled bitstring
  measure(n)  prints \"<bits>\": <count> lines for n shots, including n = 1";

/// How measurement outcomes are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Bitstrings, and `"bits": count` lines for repeated measurements.
    #[default]
    Text,
    /// One JSON value per measurement.
    Json,
}

/// Parse and build the program stored at `path`.
pub fn load_program(path: &Path) -> Result<Program> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    compile_source(&source)
}

/// Parse and build a program from source text.
pub fn compile_source(source: &str) -> Result<Program> {
    let tree = parse(source).map_err(|e| anyhow::anyhow!("Parse error: {e}"))?;
    build(tree.source(), &tree.root()).map_err(|e| anyhow::anyhow!("{e}"))
}

/// Render one outcome. Text output for counts has one line per bitstring,
/// most frequent first.
pub fn render_outcome(outcome: &MeasurementOutcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string(outcome).context("Failed to serialise measurement outcome")
        }
        OutputFormat::Text => Ok(match outcome {
            MeasurementOutcome::Single(bits) => bits.clone(),
            MeasurementOutcome::Counts(counts) => counts
                .sorted()
                .into_iter()
                .map(|(bits, count)| format!("\"{bits}\": {count}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }),
    }
}
