//! Error types for the state engine.

use num_complex::Complex64;
use thiserror::Error;

/// Errors that can occur while building qubits or applying gates.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum StateError {
    /// Amplitudes do not satisfy `|zero|² + |one|² = 1`.
    #[error("Qubit is not normalised: {zero} |0>, {one} |1>{}", format_gate_context(.gate_name))]
    NotNormalised {
        /// Coefficient of |0⟩.
        zero: Complex64,
        /// Coefficient of |1⟩.
        one: Complex64,
        /// Gate that produced the amplitudes, if any.
        gate_name: Option<String>,
    },

    /// The register holds fewer qubits than the gate acts on.
    #[error("Not enough qubits in computer: gate '{gate_name}' needs {required}, register has {available}")]
    NotEnoughQubits {
        /// Name of the gate.
        gate_name: String,
        /// Number of qubits the gate acts on.
        required: usize,
        /// Number of qubits in the register.
        available: usize,
    },

    /// A qubit index is past the end of the register.
    #[error("Index {index} greater than number of qubits ({num_qubits}) (gate: {gate_name})")]
    IndexOutOfRange {
        /// Name of the gate.
        gate_name: String,
        /// The offending index.
        index: usize,
        /// Number of qubits in the register.
        num_qubits: usize,
    },

    /// A gate was given the wrong number of operands.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    OperandCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of operands.
        expected: usize,
        /// Actual number of operands provided.
        got: usize,
    },
}

impl StateError {
    /// Attach a gate name to a normalisation failure.
    #[must_use]
    pub fn with_gate(self, name: &str) -> Self {
        match self {
            StateError::NotNormalised { zero, one, .. } => StateError::NotNormalised {
                zero,
                one,
                gate_name: Some(name.to_string()),
            },
            other => other,
        }
    }
}

#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for state operations.
pub type StateResult<T> = Result<T, StateError>;
