//! The fixed gate set and its unitary matrices.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::fmt;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Gates understood by the register.
///
/// Operand order for multi-qubit gates is controls first, target last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Pauli-X (NOT).
    PauliX,
    /// Pauli-Y.
    PauliY,
    /// Pauli-Z.
    PauliZ,
    /// Hadamard.
    Hadamard,
    /// Phase gate `diag(1, i)`.
    Phase,
    /// π/8 gate `diag(1, e^{iπ/4})`.
    PiBy8,
    /// Controlled-NOT.
    ControlledNot,
    /// Controlled-Z.
    ControlledZ,
    /// SWAP.
    Swap,
    /// Toffoli (CCNOT).
    Toffoli,
}

/// A gate's matrix over the joint basis of its operands.
///
/// Rows and columns are ordered `00…0` to `11…1` with the first operand as
/// the most significant bit.
#[derive(Debug, Clone, PartialEq)]
pub enum GateMatrix {
    /// 2×2 matrix over `|0⟩, |1⟩`.
    Single([[Complex64; 2]; 2]),
    /// 4×4 matrix over `|00⟩ … |11⟩`.
    Two([[Complex64; 4]; 4]),
    /// 8×8 matrix over `|000⟩ … |111⟩`.
    Three([[Complex64; 8]; 8]),
}

impl StandardGate {
    /// Every gate, in declaration order.
    pub const ALL: [StandardGate; 10] = [
        StandardGate::PauliX,
        StandardGate::PauliY,
        StandardGate::PauliZ,
        StandardGate::Hadamard,
        StandardGate::Phase,
        StandardGate::PiBy8,
        StandardGate::ControlledNot,
        StandardGate::ControlledZ,
        StandardGate::Swap,
        StandardGate::Toffoli,
    ];

    /// Source keyword for this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::PauliX => "x",
            StandardGate::PauliY => "y",
            StandardGate::PauliZ => "z",
            StandardGate::Hadamard => "hadamard",
            StandardGate::Phase => "phase",
            StandardGate::PiBy8 => "pi_8",
            StandardGate::ControlledNot => "cnot",
            StandardGate::ControlledZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::Toffoli => "toffoli",
        }
    }

    /// Number of qubits this gate acts on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            StandardGate::PauliX
            | StandardGate::PauliY
            | StandardGate::PauliZ
            | StandardGate::Hadamard
            | StandardGate::Phase
            | StandardGate::PiBy8 => 1,
            StandardGate::ControlledNot | StandardGate::ControlledZ | StandardGate::Swap => 2,
            StandardGate::Toffoli => 3,
        }
    }

    /// The gate's unitary.
    pub fn matrix(&self) -> GateMatrix {
        match self {
            StandardGate::PauliX => GateMatrix::Single([[ZERO, ONE], [ONE, ZERO]]),
            StandardGate::PauliY => GateMatrix::Single([[ZERO, -I], [I, ZERO]]),
            StandardGate::PauliZ => GateMatrix::Single([[ONE, ZERO], [ZERO, -ONE]]),
            StandardGate::Hadamard => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                GateMatrix::Single([[h, h], [h, -h]])
            }
            StandardGate::Phase => GateMatrix::Single([[ONE, ZERO], [ZERO, I]]),
            StandardGate::PiBy8 => {
                // cos + i·sin keeps the factor on the unit circle
                let phase = Complex64::new(FRAC_PI_4.cos(), FRAC_PI_4.sin());
                GateMatrix::Single([[ONE, ZERO], [ZERO, phase]])
            }
            StandardGate::ControlledNot => {
                let mut m = identity::<4>();
                m.swap(2, 3);
                GateMatrix::Two(m)
            }
            StandardGate::ControlledZ => {
                let mut m = identity::<4>();
                m[3][3] = -ONE;
                GateMatrix::Two(m)
            }
            StandardGate::Swap => {
                let mut m = identity::<4>();
                m.swap(1, 2);
                GateMatrix::Two(m)
            }
            StandardGate::Toffoli => {
                let mut m = identity::<8>();
                m.swap(6, 7);
                GateMatrix::Three(m)
            }
        }
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn identity<const D: usize>() -> [[Complex64; D]; D] {
    let mut m = [[ZERO; D]; D];
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = ONE;
    }
    m
}
