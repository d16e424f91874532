//! Parser for the qcsim Circuit Language
//!
//! Turns program text into a [`SyntaxTree`] whose nodes implement
//! [`qcsim_lang::SyntaxNode`], ready for [`qcsim_lang::build`].
//!
//! # Language
//!
//! ```text
//! q = (1/root(2, 2)) |0> + (i/root(2, 2)) |1>   // qubit declaration
//! x(q)  y(q)  z(q)  hadamard(q)  phase(q)  pi_8(q)
//! cnot(c, t)  cz(c, t)  swap(a, b)
//! toffoli(c1, c2, t)
//! measure()  measure(1000)
//! ```
//!
//! Amplitude expressions support `+ - * / ^`, the constants `pi`, `i` and
//! `e`, imaginary literals such as `2i`, and the functions `sin`, `cos`,
//! `tan` and `root(x, n)`. Statements may be separated by newlines or `;`.
//!
//! # Example
//!
//! ```rust
//! use qcsim_lang::{MeasurementOutcome, Runner, build};
//! use qcsim_syntax::parse;
//!
//! let source = r"
//!     a = |1>
//!     b = |0>
//!     cnot(a, b)
//!     measure()
//! ";
//!
//! let tree = parse(source).unwrap();
//! let program = build(tree.source(), &tree.root()).unwrap();
//! let outcomes = Runner::with_seed(1).run(&program).unwrap();
//! assert_eq!(outcomes, vec![MeasurementOutcome::Single("11".into())]);
//! ```

mod error;
mod lexer;
mod parser;
mod tree;

pub use error::{SyntaxError, SyntaxResult};
pub use parser::{MAX_NESTING, parse};
pub use tree::{Node, SyntaxTree};
