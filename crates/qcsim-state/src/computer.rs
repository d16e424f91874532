//! The quantum register and gate application.

use num_complex::Complex64;
use rand::Rng;
use tracing::trace;

use crate::error::{StateError, StateResult};
use crate::gate::{GateMatrix, StandardGate};
use crate::qubit::Qubit;

/// An ordered register of independently stored qubits.
///
/// The register keeps one amplitude pair per qubit rather than a `2^n` joint
/// statevector. Multi-qubit gates build the joint amplitudes of their operands
/// on the fly, apply the gate matrix, and fold the result back into per-qubit
/// marginals. This product-state model cannot represent entanglement.
#[derive(Debug, Clone, PartialEq)]
pub struct Computer {
    state: Vec<Qubit>,
}

impl Computer {
    /// Create a register holding `qubits` in order.
    pub fn new(qubits: Vec<Qubit>) -> Self {
        Self { state: qubits }
    }

    /// Number of qubits in the register.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.state.len()
    }

    /// All qubits in register order.
    #[inline]
    pub fn qubits(&self) -> &[Qubit] {
        &self.state
    }

    /// The qubit at `index`, if any.
    #[inline]
    pub fn qubit(&self, index: usize) -> Option<&Qubit> {
        self.state.get(index)
    }

    /// Sample every qubit once, drawing from `rng`.
    ///
    /// Returns one character per qubit in register order. The register is
    /// left untouched, so repeated calls sample the same distribution.
    pub fn measure<R: Rng>(&self, rng: &mut R) -> String {
        self.measure_with(|| rng.r#gen::<f64>())
    }

    /// Sample every qubit once using `sample` as the source of uniform
    /// values in `[0, 1)`.
    pub fn measure_with(&self, mut sample: impl FnMut() -> f64) -> String {
        self.state
            .iter()
            .map(|q| {
                let value = sample();
                let bit = if value <= q.probability_zero() { '0' } else { '1' };
                trace!(sample = value, p_zero = q.probability_zero(), %bit, "sampled qubit");
                bit
            })
            .collect()
    }

    /// Apply `gate` to the qubits at `indices`.
    pub fn apply(&mut self, gate: StandardGate, indices: &[usize]) -> StateResult<&mut Self> {
        let name = gate.name();
        if indices.len() != gate.num_qubits() {
            return Err(StateError::OperandCountMismatch {
                gate_name: name.to_string(),
                expected: gate.num_qubits(),
                got: indices.len(),
            });
        }

        match gate.matrix() {
            GateMatrix::Single(m) => self.apply_matrix(name, [indices[0]], &m),
            GateMatrix::Two(m) => self.apply_matrix(name, [indices[0], indices[1]], &m),
            GateMatrix::Three(m) => {
                self.apply_matrix(name, [indices[0], indices[1], indices[2]], &m)
            }
        }
    }

    pub fn pauli_x(&mut self, index: usize) -> StateResult<&mut Self> {
        self.apply(StandardGate::PauliX, &[index])
    }

    pub fn pauli_y(&mut self, index: usize) -> StateResult<&mut Self> {
        self.apply(StandardGate::PauliY, &[index])
    }

    pub fn pauli_z(&mut self, index: usize) -> StateResult<&mut Self> {
        self.apply(StandardGate::PauliZ, &[index])
    }

    pub fn hadamard(&mut self, index: usize) -> StateResult<&mut Self> {
        self.apply(StandardGate::Hadamard, &[index])
    }

    pub fn phase(&mut self, index: usize) -> StateResult<&mut Self> {
        self.apply(StandardGate::Phase, &[index])
    }

    pub fn pi_by_8(&mut self, index: usize) -> StateResult<&mut Self> {
        self.apply(StandardGate::PiBy8, &[index])
    }

    pub fn controlled_not(&mut self, control: usize, target: usize) -> StateResult<&mut Self> {
        self.apply(StandardGate::ControlledNot, &[control, target])
    }

    pub fn controlled_z(&mut self, control: usize, target: usize) -> StateResult<&mut Self> {
        self.apply(StandardGate::ControlledZ, &[control, target])
    }

    pub fn swap(&mut self, index1: usize, index2: usize) -> StateResult<&mut Self> {
        self.apply(StandardGate::Swap, &[index1, index2])
    }

    pub fn toffoli(
        &mut self,
        control1: usize,
        control2: usize,
        target: usize,
    ) -> StateResult<&mut Self> {
        self.apply(StandardGate::Toffoli, &[control1, control2, target])
    }

    /// Apply a `DIM × DIM` matrix (`DIM = 2^N`) to `N` qubits.
    ///
    /// Joint input amplitudes are products of the operands' coefficients,
    /// with operand 0 as the most significant bit of the basis index. Each
    /// operand's new coefficients are the sums of the joint outputs whose bit
    /// for that operand is 0 or 1. Nothing is written unless every new qubit
    /// passes normalisation.
    fn apply_matrix<const N: usize, const DIM: usize>(
        &mut self,
        gate_name: &str,
        indices: [usize; N],
        matrix: &[[Complex64; DIM]; DIM],
    ) -> StateResult<&mut Self> {
        debug_assert_eq!(1 << N, DIM);
        self.check_operands(gate_name, &indices)?;

        let operands = indices.map(|i| self.state[i]);
        let bit_of = |basis: usize, operand: usize| (basis >> (N - 1 - operand)) & 1;

        let mut input_amps = [Complex64::new(0.0, 0.0); DIM];
        for (basis, amp) in input_amps.iter_mut().enumerate() {
            *amp = operands
                .iter()
                .enumerate()
                .map(|(k, q)| if bit_of(basis, k) == 0 { q.zero() } else { q.one() })
                .product();
        }

        let mut output_amps = [Complex64::new(0.0, 0.0); DIM];
        for (row, out) in output_amps.iter_mut().enumerate() {
            for (col, amp) in input_amps.iter().enumerate() {
                *out += matrix[row][col] * *amp;
            }
        }

        let mut updated = [Qubit::ZERO; N];
        for (k, slot) in updated.iter_mut().enumerate() {
            let mut zero = Complex64::new(0.0, 0.0);
            let mut one = Complex64::new(0.0, 0.0);
            for (basis, amp) in output_amps.iter().enumerate() {
                if bit_of(basis, k) == 0 {
                    zero += *amp;
                } else {
                    one += *amp;
                }
            }
            *slot = Qubit::new(zero, one).map_err(|e| e.with_gate(gate_name))?;
        }

        for (index, qubit) in indices.into_iter().zip(updated) {
            self.state[index] = qubit;
        }
        Ok(self)
    }

    fn check_operands(&self, gate_name: &str, indices: &[usize]) -> StateResult<()> {
        if self.state.len() < indices.len() {
            return Err(StateError::NotEnoughQubits {
                gate_name: gate_name.to_string(),
                required: indices.len(),
                available: self.state.len(),
            });
        }
        if let Some(&index) = indices.iter().find(|&&i| i >= self.state.len()) {
            return Err(StateError::IndexOutOfRange {
                gate_name: gate_name.to_string(),
                index,
                num_qubits: self.state.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TOL: f64 = 1e-9;

    fn qubit(zero: f64, one: f64) -> Qubit {
        Qubit::new(Complex64::new(zero, 0.0), Complex64::new(one, 0.0)).unwrap()
    }

    fn plus() -> Qubit {
        qubit(FRAC_1_SQRT_2, FRAC_1_SQRT_2)
    }

    #[test]
    fn test_pauli_x_round_trip() {
        let mut computer = Computer::new(vec![Qubit::ZERO]);
        computer.pauli_x(0).unwrap();
        assert!(computer.qubits()[0].approx_eq(&Qubit::ONE, TOL));

        computer.pauli_x(0).unwrap();
        assert!(computer.qubits()[0].approx_eq(&Qubit::ZERO, TOL));
    }

    #[test]
    fn test_hadamard_self_inverse() {
        let original = Qubit::new(Complex64::new(0.6, 0.0), Complex64::new(0.0, 0.8)).unwrap();
        let mut computer = Computer::new(vec![original]);
        computer.hadamard(0).unwrap().hadamard(0).unwrap();
        assert!(computer.qubits()[0].approx_eq(&original, TOL));
    }

    #[test]
    fn test_hadamard_superposition() {
        let mut computer = Computer::new(vec![Qubit::ZERO]);
        computer.hadamard(0).unwrap();
        assert!(computer.qubits()[0].approx_eq(&plus(), TOL));
    }

    #[test]
    fn test_pauli_y_and_z() {
        let mut computer = Computer::new(vec![Qubit::ZERO, Qubit::ONE]);
        computer.pauli_y(0).unwrap().pauli_z(1).unwrap();

        let y = computer.qubits()[0];
        assert!((y.one() - Complex64::new(0.0, 1.0)).norm() < TOL);
        let z = computer.qubits()[1];
        assert!((z.one() + Complex64::new(1.0, 0.0)).norm() < TOL);
    }

    #[test]
    fn test_phase_gates() {
        let mut computer = Computer::new(vec![Qubit::ONE, Qubit::ONE]);
        computer.phase(0).unwrap().pi_by_8(1).unwrap();

        assert!((computer.qubits()[0].one() - Complex64::new(0.0, 1.0)).norm() < TOL);
        let t = computer.qubits()[1].one();
        assert!((t - Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)).norm() < TOL);

        // Two phase gates equal Pauli-Z on |1⟩.
        let mut computer = Computer::new(vec![Qubit::ONE]);
        computer.phase(0).unwrap().phase(0).unwrap();
        assert!((computer.qubits()[0].one() + Complex64::new(1.0, 0.0)).norm() < TOL);
    }

    #[test]
    fn test_swap() {
        let mut computer = Computer::new(vec![Qubit::ZERO, Qubit::ONE]);
        computer.swap(0, 1).unwrap();
        assert_eq!(computer.qubit(0), Some(&Qubit::ONE));
        assert_eq!(computer.qubit(1), Some(&Qubit::ZERO));
        assert_eq!(computer.qubit(2), None);
    }

    #[test]
    fn test_cnot_truth_table() {
        for (control, target, expected) in [
            (Qubit::ZERO, Qubit::ZERO, Qubit::ZERO),
            (Qubit::ZERO, Qubit::ONE, Qubit::ONE),
            (Qubit::ONE, Qubit::ZERO, Qubit::ONE),
            (Qubit::ONE, Qubit::ONE, Qubit::ZERO),
        ] {
            let mut computer = Computer::new(vec![control, target]);
            computer.controlled_not(0, 1).unwrap();
            assert!(computer.qubits()[0].approx_eq(&control, TOL));
            assert!(computer.qubits()[1].approx_eq(&expected, TOL));
        }
    }

    #[test]
    fn test_unnormalised_fold_is_rejected() {
        // Summing the joint outputs of |+⟩|0⟩ after a swap gives |0⟩ an
        // amplitude of √2.
        let mut computer = Computer::new(vec![plus(), Qubit::ZERO]);
        let before = computer.clone();

        let err = computer.swap(0, 1).unwrap_err();
        assert!(matches!(
            err,
            StateError::NotNormalised {
                gate_name: Some(ref name),
                ..
            } if name == "swap"
        ));
        assert_eq!(computer, before);
    }

    #[test]
    fn test_cnot_reversed_operands() {
        let mut computer = Computer::new(vec![Qubit::ZERO, Qubit::ONE]);
        computer.controlled_not(1, 0).unwrap();
        assert!(computer.qubits()[0].approx_eq(&Qubit::ONE, TOL));
        assert!(computer.qubits()[1].approx_eq(&Qubit::ONE, TOL));
    }

    #[test]
    fn test_cnot_superposed_control_collapses_to_marginals() {
        let mut computer = Computer::new(vec![plus(), Qubit::ZERO]);
        computer.controlled_not(0, 1).unwrap();
        assert!(computer.qubits()[0].approx_eq(&plus(), TOL));
        assert!(computer.qubits()[1].approx_eq(&plus(), TOL));
    }

    #[test]
    fn test_controlled_z() {
        let mut computer = Computer::new(vec![Qubit::ONE, Qubit::ONE]);
        computer.controlled_z(0, 1).unwrap();
        assert!(computer.qubits()[0].approx_eq(&qubit(0.0, -1.0), TOL));
        assert!(computer.qubits()[1].approx_eq(&qubit(0.0, -1.0), TOL));
    }

    #[test]
    fn test_toffoli_truth_table() {
        for bits in 0..8_u8 {
            let basis = |bit: u8| if bit == 0 { Qubit::ZERO } else { Qubit::ONE };
            let (a, b, c) = ((bits >> 2) & 1, (bits >> 1) & 1, bits & 1);
            let mut computer = Computer::new(vec![basis(a), basis(b), basis(c)]);
            computer.toffoli(0, 1, 2).unwrap();

            let expected_c = c ^ (a & b);
            assert!(computer.qubits()[0].approx_eq(&basis(a), TOL));
            assert!(computer.qubits()[1].approx_eq(&basis(b), TOL));
            assert!(
                computer.qubits()[2].approx_eq(&basis(expected_c), TOL),
                "input {a}{b}{c}"
            );
        }
    }

    #[test]
    fn test_not_enough_qubits() {
        let mut computer = Computer::new(vec![Qubit::ZERO]);
        let err = computer.controlled_not(0, 0).unwrap_err();
        assert!(matches!(
            err,
            StateError::NotEnoughQubits {
                required: 2,
                available: 1,
                ..
            }
        ));

        let mut empty = Computer::new(vec![]);
        assert!(matches!(
            empty.hadamard(0),
            Err(StateError::NotEnoughQubits { .. })
        ));
    }

    #[test]
    fn test_index_out_of_range_leaves_state() {
        let mut computer = Computer::new(vec![Qubit::ONE, Qubit::ZERO]);
        let before = computer.clone();

        let err = computer.swap(0, 2).unwrap_err();
        assert!(matches!(
            err,
            StateError::IndexOutOfRange {
                index: 2,
                num_qubits: 2,
                ..
            }
        ));
        assert_eq!(computer, before);
        assert_eq!(computer.measure_with(|| 0.5), "10");
    }

    #[test]
    fn test_operand_count_mismatch() {
        let mut computer = Computer::new(vec![Qubit::ZERO, Qubit::ZERO]);
        assert!(matches!(
            computer.apply(StandardGate::Swap, &[0]),
            Err(StateError::OperandCountMismatch {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_measure_thresholds() {
        let computer = Computer::new(vec![Qubit::ZERO]);
        assert_eq!(computer.measure_with(|| 0.0), "0");
        assert_eq!(computer.measure_with(|| 0.999_999), "0");

        let computer = Computer::new(vec![Qubit::ONE]);
        assert_eq!(computer.measure_with(|| 1e-12), "1");
        assert_eq!(computer.measure_with(|| 0.5), "1");
    }

    #[test]
    fn test_measure_register_order() {
        let computer = Computer::new(vec![Qubit::ONE, Qubit::ZERO, Qubit::ONE]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(computer.measure(&mut rng), "101");
        }
    }

    #[test]
    fn test_measure_does_not_mutate() {
        let computer = Computer::new(vec![plus()]);
        let before = computer.clone();
        let mut rng = StdRng::seed_from_u64(1);
        let _ = computer.measure(&mut rng);
        assert_eq!(computer, before);
    }
}
