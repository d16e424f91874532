//! Single-qubit amplitude pairs.

use num_complex::Complex64;
use serde::Serialize;
use std::fmt;

use crate::error::{StateError, StateResult};

/// Absolute tolerance on `|zero|² + |one|²` when checking normalisation.
pub const NORMALISATION_TOLERANCE: f64 = 1e-4;

/// A qubit `zero |0⟩ + one |1⟩`.
///
/// Every value of this type is normalised: the only constructors check
/// `||zero|² + |one|² - 1| < 1e-4` and fail otherwise. Gates never mutate a
/// qubit, they build a new one through the same checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Qubit {
    zero: Complex64,
    one: Complex64,
}

impl Qubit {
    /// The basis state |0⟩.
    pub const ZERO: Qubit = Qubit {
        zero: Complex64::new(1.0, 0.0),
        one: Complex64::new(0.0, 0.0),
    };

    /// The basis state |1⟩.
    pub const ONE: Qubit = Qubit {
        zero: Complex64::new(0.0, 0.0),
        one: Complex64::new(1.0, 0.0),
    };

    /// Create a qubit from the coefficients of |0⟩ and |1⟩.
    pub fn new(zero: Complex64, one: Complex64) -> StateResult<Self> {
        if !is_normalised(zero, one) {
            return Err(StateError::NotNormalised {
                zero,
                one,
                gate_name: None,
            });
        }
        Ok(Self { zero, one })
    }

    /// Create a qubit from the coefficient of |0⟩ alone.
    ///
    /// The |1⟩ coefficient is taken as the real, non-negative root of
    /// `1 - |zero|²`.
    pub fn from_zero_amplitude(zero: Complex64) -> StateResult<Self> {
        let one_sqr = 1.0 - zero.norm_sqr();
        if one_sqr < -NORMALISATION_TOLERANCE || one_sqr.is_nan() {
            return Err(StateError::NotNormalised {
                zero,
                one: Complex64::new(0.0, 0.0),
                gate_name: None,
            });
        }
        Self::new(zero, Complex64::new(one_sqr.max(0.0).sqrt(), 0.0))
    }

    /// Coefficient of |0⟩.
    #[inline]
    pub fn zero(&self) -> Complex64 {
        self.zero
    }

    /// Coefficient of |1⟩.
    #[inline]
    pub fn one(&self) -> Complex64 {
        self.one
    }

    /// Probability of observing 0 when measured.
    ///
    /// Measurement compares a uniform sample in `[0, 1)` against this value:
    /// samples at or below it read 0, samples above it read 1.
    #[inline]
    pub fn probability_zero(&self) -> f64 {
        self.zero.norm_sqr()
    }

    /// Probability of observing 1 when measured.
    #[inline]
    pub fn probability_one(&self) -> f64 {
        self.one.norm_sqr()
    }

    /// Compare amplitudes component-wise within `tolerance`.
    pub fn approx_eq(&self, other: &Qubit, tolerance: f64) -> bool {
        (self.zero - other.zero).norm() < tolerance && (self.one - other.one).norm() < tolerance
    }
}

fn is_normalised(zero: Complex64, one: Complex64) -> bool {
    (1.0 - (zero.norm_sqr() + one.norm_sqr())).abs() < NORMALISATION_TOLERANCE
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} |0>, {} |1>", self.zero, self.one)
    }
}
