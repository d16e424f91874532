//! Program execution against a quantum register.

use qcsim_state::Computer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::builder::Program;
use crate::counts::Counts;
use crate::error::{LangError, LangResult};
use crate::instruction::{Instruction, InstructionKind};

/// The result of one `measure` instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MeasurementOutcome {
    /// `measure()`: one sample.
    Single(String),
    /// `measure(k)`: `k` samples aggregated.
    Counts(Counts),
}

/// Outcomes of a run together with the final register.
#[derive(Debug, Clone)]
pub struct Execution {
    pub outcomes: Vec<MeasurementOutcome>,
    pub register: Computer,
}

/// Executes programs, owning the random source used for measurement.
#[derive(Debug, Clone)]
pub struct Runner<R = StdRng> {
    rng: R,
}

impl Runner<StdRng> {
    /// A runner seeded from system entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A runner whose measurements are reproducible for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Runner<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Runner<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Run `program` and return its measurement outcomes in order.
    pub fn run(&mut self, program: &Program) -> LangResult<Vec<MeasurementOutcome>> {
        self.execute(program).map(|execution| execution.outcomes)
    }

    /// Run `program`, stopping at the first failing instruction.
    ///
    /// The register is built from the declared variables in order. Gate
    /// arguments resolve to the first variable with a matching name.
    #[instrument(skip(self, program))]
    pub fn execute(&mut self, program: &Program) -> LangResult<Execution> {
        let mut register = Computer::new(program.qubits());
        debug!(
            "Starting run: {} qubits, {} instructions",
            register.num_qubits(),
            program.instructions.len()
        );

        let mut outcomes = Vec::new();
        for instruction in &program.instructions {
            match instruction.kind {
                InstructionKind::Measure => {
                    outcomes.push(self.measure(&register, instruction)?);
                }
                InstructionKind::Gate(gate) => {
                    let indices = instruction
                        .args
                        .iter()
                        .map(|name| {
                            program
                                .variable_index(name)
                                .ok_or_else(|| LangError::UndeclaredVariable(name.clone()))
                        })
                        .collect::<LangResult<Vec<_>>>()?;
                    register.apply(gate, &indices)?;
                }
            }
            debug!("Executed {}", instruction);
        }

        Ok(Execution { outcomes, register })
    }

    fn measure(
        &mut self,
        register: &Computer,
        instruction: &Instruction,
    ) -> LangResult<MeasurementOutcome> {
        match instruction.args.as_slice() {
            [] => Ok(MeasurementOutcome::Single(register.measure(&mut self.rng))),
            [count] => {
                let shots: u64 = count.parse().map_err(|e: std::num::ParseIntError| {
                    LangError::LiteralFormat {
                        literal: count.clone(),
                        message: e.to_string(),
                    }
                })?;
                let counts: Counts = (0..shots)
                    .map(|_| register.measure(&mut self.rng))
                    .collect();
                debug!("Measured {} shots, {} distinct outcomes", shots, counts.len());
                Ok(MeasurementOutcome::Counts(counts))
            }
            args => Err(LangError::WrongArgumentCount {
                instruction: instruction.name().to_string(),
                expected: 1,
                got: args.len(),
            }),
        }
    }
}
