//! Instructions produced by the builder.

use qcsim_state::StandardGate;
use serde::Serialize;
use std::fmt;

/// What an instruction does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InstructionKind {
    /// Sample the register, optionally several times.
    Measure,
    /// Apply a fixed gate.
    Gate(StandardGate),
}

impl InstructionKind {
    /// Source keyword.
    pub fn name(&self) -> &'static str {
        match self {
            InstructionKind::Measure => "measure",
            InstructionKind::Gate(gate) => gate.name(),
        }
    }

    /// Number of variable arguments the instruction takes.
    pub fn arity(&self) -> usize {
        match self {
            InstructionKind::Measure => 0,
            InstructionKind::Gate(gate) => gate.num_qubits(),
        }
    }
}

/// A single instruction with its arguments as written in the source.
///
/// Gate arguments are variable names in operand order. A measurement holds at
/// most one argument, its repetition count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub args: Vec<String>,
}

impl Instruction {
    pub fn new(kind: InstructionKind, args: Vec<String>) -> Self {
        Self { kind, args }
    }

    /// A single measurement.
    pub fn measure() -> Self {
        Self::new(InstructionKind::Measure, vec![])
    }

    /// A measurement repeated `count` times.
    pub fn measure_repeated(count: u64) -> Self {
        Self::new(InstructionKind::Measure, vec![count.to_string()])
    }

    /// A gate applied to the named variables.
    pub fn gate<S: Into<String>>(
        gate: StandardGate,
        operands: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            InstructionKind::Gate(gate),
            operands.into_iter().map(Into::into).collect(),
        )
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.kind.arity()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.args.join(", "))
    }
}
