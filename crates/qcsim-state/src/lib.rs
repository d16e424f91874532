//! qcsim State Engine
//!
//! This crate holds the execution side of qcsim: single qubits, the fixed gate
//! set, and the [`Computer`] register that applies gates and samples
//! measurements.
//!
//! # Model
//!
//! Each qubit is stored as its own amplitude pair `zero |0⟩ + one |1⟩`. The
//! register never materialises a `2^n` joint statevector; two- and three-qubit
//! gates compute the joint amplitudes of their operands transiently and fold the
//! result back into per-qubit marginals. This keeps the register linear in the
//! number of qubits at the cost of not representing entanglement.
//!
//! Every qubit value is normalised. Gate application re-validates the qubits it
//! produces and leaves the register untouched when validation fails.
//!
//! # Example
//!
//! ```rust
//! use qcsim_state::{Computer, Qubit};
//!
//! let mut computer = Computer::new(vec![Qubit::ONE, Qubit::ZERO]);
//! computer.swap(0, 1).unwrap();
//!
//! // Deterministic qubits measure the same way for any sample.
//! assert_eq!(computer.measure_with(|| 0.5), "01");
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Keyword |
//! |------|--------|---------|
//! | Pauli-X, Y, Z | 1 | `x`, `y`, `z` |
//! | Hadamard | 1 | `hadamard` |
//! | Phase `diag(1, i)` | 1 | `phase` |
//! | π/8 `diag(1, e^{iπ/4})` | 1 | `pi_8` |
//! | Controlled-NOT, Controlled-Z | 2 | `cnot`, `cz` |
//! | SWAP | 2 | `swap` |
//! | Toffoli | 3 | `toffoli` |

pub mod computer;
pub mod error;
pub mod gate;
pub mod qubit;

pub use computer::Computer;
pub use error::{StateError, StateResult};
pub use gate::{GateMatrix, StandardGate};
pub use qubit::{NORMALISATION_TOLERANCE, Qubit};
