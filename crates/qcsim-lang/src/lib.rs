//! qcsim Language Core
//!
//! Everything between a parsed program and its measurement outcomes:
//!
//! - [`syntax`]: the read-only tree interface a parser must provide, and the
//!   closed set of statement and expression kinds.
//! - [`Evaluator`]: reduces amplitude expressions to complex numbers.
//! - [`Builder`]: walks the tree into a [`Program`] of variables and
//!   instructions.
//! - [`Runner`]: executes a [`Program`] on a `qcsim_state::Computer`.
//!
//! The crate does not parse text itself. Any tree implementing
//! [`SyntaxNode`] can be built and run.
//!
//! # Example
//!
//! ```rust
//! use qcsim_lang::{Instruction, MeasurementOutcome, Program, Runner, Variable};
//! use qcsim_state::{Qubit, StandardGate};
//!
//! let program = Program::new(
//!     vec![
//!         Variable { name: "a".into(), qubit: Qubit::ONE },
//!         Variable { name: "b".into(), qubit: Qubit::ZERO },
//!     ],
//!     vec![
//!         Instruction::gate(StandardGate::ControlledNot, ["a", "b"]),
//!         Instruction::measure(),
//!     ],
//! );
//!
//! let outcomes = Runner::with_seed(0).run(&program).unwrap();
//! assert_eq!(outcomes, vec![MeasurementOutcome::Single("11".into())]);
//! ```

pub mod builder;
pub mod counts;
pub mod error;
pub mod eval;
pub mod instruction;
pub mod runner;
pub mod syntax;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::{Builder, Program, Variable, build};
pub use counts::Counts;
pub use error::{LangError, LangResult};
pub use eval::Evaluator;
pub use instruction::{Instruction, InstructionKind};
pub use runner::{Execution, MeasurementOutcome, Runner};
pub use syntax::{ExprKind, Point, Range, SourceText, StatementKind, SyntaxNode};
