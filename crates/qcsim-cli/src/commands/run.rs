//! Run command implementation.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use qcsim_lang::Runner;

use super::common::{OutputFormat, load_program, render_outcome};

/// Load, build and run the program at `input`, printing every outcome.
pub fn execute(input: &Path, seed: Option<u64>, format: OutputFormat) -> Result<()> {
    let program = load_program(input)?;
    info!(
        "Loaded {}: {} qubits, {} instructions",
        input.display(),
        program.variables.len(),
        program.instructions.len()
    );

    let mut runner = match seed {
        Some(seed) => {
            info!("Sampling with seed {}", seed);
            Runner::with_seed(seed)
        }
        None => Runner::new(),
    };

    let outcomes = runner.run(&program).map_err(|e| anyhow::anyhow!("{e}"))?;
    for outcome in &outcomes {
        let rendered = render_outcome(outcome, format)?;
        if !rendered.is_empty() {
            println!("{rendered}");
        }
    }

    Ok(())
}
