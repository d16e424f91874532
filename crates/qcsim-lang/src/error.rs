//! Error types for building and running programs.

use qcsim_state::StateError;
use thiserror::Error;

/// Errors that can occur while building or running a program.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum LangError {
    /// The tree does not have the shape the builder expects.
    #[error("Malformed syntax tree: {0}")]
    Structural(String),

    /// A numeric or integer literal could not be parsed.
    #[error("Invalid literal '{literal}': {message}")]
    LiteralFormat { literal: String, message: String },

    /// A declared qubit is not normalised.
    #[error("Qubit is not normalised: {name} ({source})")]
    InvalidQubit {
        name: String,
        #[source]
        source: StateError,
    },

    /// An instruction names a variable that was never declared.
    #[error("Variable used but not declared: {0}")]
    UndeclaredVariable(String),

    /// An instruction carries the wrong number of arguments.
    #[error("Instruction '{instruction}' expects {expected} arguments, got {got}")]
    WrongArgumentCount {
        instruction: String,
        expected: usize,
        got: usize,
    },

    /// The register rejected a gate.
    #[error(transparent)]
    State(#[from] StateError),
}

/// Result type for language operations.
pub type LangResult<T> = Result<T, LangError>;
