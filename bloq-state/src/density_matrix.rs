//! Density matrix representation for mixed quantum states
//!
//! A density matrix ρ is a positive semi-definite, Hermitian matrix with
//! Tr(ρ) = 1. Pure states are ρ = |ψ⟩⟨ψ|; mixed states arise once a noise
//! channel ρ → Σᵢ Kᵢ ρ Kᵢ† has been applied.
//!
//! # Key Properties
//!
//! - **Purity**: Tr(ρ²) ∈ [1/d, 1], equals 1 for pure states
//! - **Partial Trace**: reduced density matrix of a subsystem
//!
//! Qubit `q` corresponds to bit `q` of a basis index (qubit 0 is the least
//! significant bit).

use crate::error::{Result, StateError};
use bloq_gates::Operator;
use num_complex::Complex64;
use std::fmt;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Density matrix of an n-qubit state
///
/// Stores the full 2^n × 2^n matrix in row-major order.
#[derive(Clone, PartialEq)]
pub struct DensityMatrix {
    num_qubits: usize,
    dimension: usize,
    matrix: Vec<Complex64>,
}

impl DensityMatrix {
    /// Create a density matrix initialized to |0...0⟩⟨0...0|
    ///
    /// # Errors
    /// Returns error if num_qubits is too large to address
    pub fn new(num_qubits: usize) -> Result<Self> {
        let dimension = Self::dimension_for(num_qubits)?;
        let mut matrix = vec![ZERO; dimension * dimension];
        matrix[0] = Complex64::new(1.0, 0.0);

        Ok(Self {
            num_qubits,
            dimension,
            matrix,
        })
    }

    /// Compute ρ = |ψ⟩⟨ψ| from amplitudes
    pub fn from_state_vector(num_qubits: usize, amplitudes: &[Complex64]) -> Result<Self> {
        let dimension = Self::dimension_for(num_qubits)?;
        if amplitudes.len() != dimension {
            return Err(StateError::DimensionMismatch {
                expected: dimension,
                actual: amplitudes.len(),
            });
        }

        let mut matrix = Vec::with_capacity(dimension * dimension);
        for a in amplitudes {
            for b in amplitudes {
                matrix.push(a * b.conj());
            }
        }

        Ok(Self {
            num_qubits,
            dimension,
            matrix,
        })
    }

    fn dimension_for(num_qubits: usize) -> Result<usize> {
        // 2^n × 2^n entries must stay addressable
        if num_qubits == 0 || num_qubits >= usize::BITS as usize / 2 {
            return Err(StateError::InvalidDimension {
                dimension: num_qubits,
            });
        }
        Ok(1usize << num_qubits)
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Matrix dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Matrix element ρᵢⱼ
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * self.dimension + col]
    }

    /// Row-major matrix data
    pub fn matrix(&self) -> &[Complex64] {
        &self.matrix
    }

    /// Apply a unitary: ρ → U ρ U†
    ///
    /// `qubits[i]` is the state qubit bound to operand `i` of the operator.
    pub fn apply_operator(&mut self, op: &Operator, qubits: &[usize]) -> Result<()> {
        self.check_operands(op, qubits)?;
        self.matrix = self.sandwich(op, qubits);
        Ok(())
    }

    /// Apply a channel: ρ → Σᵢ Kᵢ ρ Kᵢ†
    ///
    /// Every Kraus operator acts on the same operand qubits.
    pub fn apply_channel(&mut self, kraus_ops: &[Operator], qubits: &[usize]) -> Result<()> {
        for op in kraus_ops {
            self.check_operands(op, qubits)?;
        }

        let mut result = vec![ZERO; self.matrix.len()];
        for op in kraus_ops {
            for (acc, term) in result.iter_mut().zip(self.sandwich(op, qubits)) {
                *acc += term;
            }
        }

        self.matrix = result;
        Ok(())
    }

    /// Compute K ρ K† for an operator embedded on `qubits`
    fn sandwich(&self, op: &Operator, qubits: &[usize]) -> Vec<Complex64> {
        let dim = self.dimension;
        let mask = qubits.iter().fold(0usize, |m, &q| m | (1 << q));

        // temp = K ρ
        let mut temp = vec![ZERO; dim * dim];
        for i in 0..dim {
            for k in 0..dim {
                let k_elem = embedded_element(op, qubits, mask, i, k);
                if k_elem == ZERO {
                    continue;
                }
                for j in 0..dim {
                    temp[i * dim + j] += k_elem * self.get(k, j);
                }
            }
        }

        // result = temp K†
        let mut result = vec![ZERO; dim * dim];
        for j in 0..dim {
            for k in 0..dim {
                let k_dag_elem = embedded_element(op, qubits, mask, j, k).conj();
                if k_dag_elem == ZERO {
                    continue;
                }
                for i in 0..dim {
                    result[i * dim + j] += temp[i * dim + k] * k_dag_elem;
                }
            }
        }

        result
    }

    fn check_operands(&self, op: &Operator, qubits: &[usize]) -> Result<()> {
        check_operands(self.num_qubits, op, qubits)
    }

    /// Purity Tr(ρ²)
    ///
    /// Returns 1 for pure states, down to 1/d for the maximally mixed state.
    pub fn purity(&self) -> f64 {
        let dim = self.dimension;
        let mut trace = ZERO;
        for i in 0..dim {
            for j in 0..dim {
                trace += self.get(i, j) * self.get(j, i);
            }
        }
        trace.re
    }

    /// Trace Tr(ρ); 1 for a valid state
    pub fn trace(&self) -> f64 {
        (0..self.dimension).map(|i| self.get(i, i).re).sum()
    }

    /// Check trace = 1, Hermiticity and non-negative diagonal within `tolerance`
    pub fn is_valid(&self, tolerance: f64) -> bool {
        if (self.trace() - 1.0).abs() > tolerance {
            return false;
        }

        for i in 0..self.dimension {
            if self.get(i, i).re < -tolerance {
                return false;
            }
            for j in (i + 1)..self.dimension {
                if (self.get(i, j) - self.get(j, i).conj()).norm() > tolerance {
                    return false;
                }
            }
        }

        true
    }

    /// Partial trace over `trace_qubits`
    ///
    /// The remaining qubits keep their relative order in the reduced matrix.
    pub fn partial_trace(&self, trace_qubits: &[usize]) -> Result<Self> {
        for (i, &q) in trace_qubits.iter().enumerate() {
            if q >= self.num_qubits {
                return Err(StateError::InvalidQubitIndex {
                    index: q,
                    num_qubits: self.num_qubits,
                });
            }
            if trace_qubits[..i].contains(&q) {
                return Err(StateError::DuplicateOperand { index: q });
            }
        }
        if trace_qubits.len() >= self.num_qubits {
            return Err(StateError::InvalidDimension { dimension: 0 });
        }

        let kept: Vec<usize> = (0..self.num_qubits)
            .filter(|q| !trace_qubits.contains(q))
            .collect();
        let traced_mask = trace_qubits.iter().fold(0usize, |m, &q| m | (1 << q));
        let reduced_dim = 1usize << kept.len();
        let mut reduced = vec![ZERO; reduced_dim * reduced_dim];

        for i in 0..self.dimension {
            for j in 0..self.dimension {
                // Only terms diagonal in the traced-out qubits survive
                if (i & traced_mask) != (j & traced_mask) {
                    continue;
                }
                let ri = compress_index(i, &kept);
                let rj = compress_index(j, &kept);
                reduced[ri * reduced_dim + rj] += self.get(i, j);
            }
        }

        Ok(Self {
            num_qubits: kept.len(),
            dimension: reduced_dim,
            matrix: reduced,
        })
    }
}

/// Validate operand list against a state of `num_qubits`
pub(crate) fn check_operands(num_qubits: usize, op: &Operator, qubits: &[usize]) -> Result<()> {
    if op.num_qubits() != qubits.len() {
        return Err(StateError::DimensionMismatch {
            expected: op.num_qubits(),
            actual: qubits.len(),
        });
    }
    for (i, &q) in qubits.iter().enumerate() {
        if q >= num_qubits {
            return Err(StateError::InvalidQubitIndex {
                index: q,
                num_qubits,
            });
        }
        if qubits[..i].contains(&q) {
            return Err(StateError::DuplicateOperand { index: q });
        }
    }
    Ok(())
}

/// Operand-local index of a full basis index
#[inline]
pub(crate) fn local_index(index: usize, qubits: &[usize]) -> usize {
    qubits
        .iter()
        .enumerate()
        .fold(0, |acc, (bit, &q)| acc | (((index >> q) & 1) << bit))
}

/// Element (row, col) of `op` embedded into the full space on `qubits`
#[inline]
fn embedded_element(op: &Operator, qubits: &[usize], mask: usize, row: usize, col: usize) -> Complex64 {
    if (row & !mask) != (col & !mask) {
        return ZERO;
    }
    op.get(local_index(row, qubits), local_index(col, qubits))
}

/// Project a full index onto the kept qubits
fn compress_index(index: usize, kept: &[usize]) -> usize {
    local_index(index, kept)
}

impl fmt::Debug for DensityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DensityMatrix {{ qubits: {}, dim: {}, purity: {:.4} }}",
            self.num_qubits,
            self.dimension,
            self.purity()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloq_core::NoiseChannel;
    use bloq_gates::{controlled, matrices};

    const TOL: f64 = 1e-10;

    fn kraus(channel: NoiseChannel) -> Vec<Operator> {
        channel
            .kraus_operators()
            .iter()
            .map(|k| Operator::single(k.matrix()))
            .collect()
    }

    fn bell() -> DensityMatrix {
        let mut dm = DensityMatrix::new(2).unwrap();
        dm.apply_operator(&Operator::single(&matrices::HADAMARD), &[0]).unwrap();
        dm.apply_operator(&controlled(&matrices::PAULI_X, 1), &[1, 0]).unwrap();
        dm
    }

    #[test]
    fn test_new_density_matrix() {
        let dm = DensityMatrix::new(2).unwrap();
        assert_eq!(dm.num_qubits(), 2);
        assert_eq!(dm.dimension(), 4);
        assert!((dm.trace() - 1.0).abs() < TOL);
        assert!((dm.purity() - 1.0).abs() < TOL);
    }

    #[test]
    fn test_zero_qubits_rejected() {
        assert!(DensityMatrix::new(0).is_err());
    }

    #[test]
    fn test_hadamard() {
        let mut dm = DensityMatrix::new(1).unwrap();
        dm.apply_operator(&Operator::single(&matrices::HADAMARD), &[0]).unwrap();
        assert!((dm.purity() - 1.0).abs() < TOL);
        assert!((dm.get(0, 1).re - 0.5).abs() < TOL);
        assert!((dm.get(1, 1).re - 0.5).abs() < TOL);
    }

    #[test]
    fn test_x_on_second_qubit() {
        let mut dm = DensityMatrix::new(2).unwrap();
        dm.apply_operator(&Operator::single(&matrices::PAULI_X), &[1]).unwrap();
        // |q1 q0⟩ = |10⟩ → basis index 2
        assert!((dm.get(2, 2).re - 1.0).abs() < TOL);
        assert!(dm.get(0, 0).norm() < TOL);
    }

    #[test]
    fn test_bell_state() {
        let dm = bell();
        assert!((dm.get(0, 0).re - 0.5).abs() < TOL);
        assert!((dm.get(3, 3).re - 0.5).abs() < TOL);
        assert!((dm.get(0, 3).re - 0.5).abs() < TOL);
        assert!(dm.is_valid(TOL));
    }

    #[test]
    fn test_partial_trace_of_bell_is_maximally_mixed() {
        let dm = bell();
        for traced in [0, 1] {
            let reduced = dm.partial_trace(&[traced]).unwrap();
            assert_eq!(reduced.num_qubits(), 1);
            assert!((reduced.purity() - 0.5).abs() < TOL);
            assert!(reduced.get(0, 1).norm() < TOL);
        }
    }

    #[test]
    fn test_partial_trace_product_state() {
        let mut dm = DensityMatrix::new(2).unwrap();
        dm.apply_operator(&Operator::single(&matrices::PAULI_X), &[1]).unwrap();
        let q1 = dm.partial_trace(&[0]).unwrap();
        assert!((q1.get(1, 1).re - 1.0).abs() < TOL);
        let q0 = dm.partial_trace(&[1]).unwrap();
        assert!((q0.get(0, 0).re - 1.0).abs() < TOL);
    }

    #[test]
    fn test_partial_trace_rejects_bad_input() {
        let dm = DensityMatrix::new(2).unwrap();
        assert!(dm.partial_trace(&[2]).is_err());
        assert!(dm.partial_trace(&[0, 0]).is_err());
        assert!(dm.partial_trace(&[0, 1]).is_err());
    }

    #[test]
    fn test_depolarizing_channel_shrinks_purity() {
        let mut dm = DensityMatrix::new(1).unwrap();
        dm.apply_channel(&kraus(NoiseChannel::Depolarizing(0.5)), &[0]).unwrap();
        assert!((dm.trace() - 1.0).abs() < TOL);
        // z: 1 → 1 − p
        assert!((dm.get(0, 0).re - dm.get(1, 1).re - 0.5).abs() < TOL);
        assert!(dm.purity() < 1.0);
    }

    #[test]
    fn test_full_amplitude_damping_resets() {
        let mut dm = DensityMatrix::new(1).unwrap();
        dm.apply_operator(&Operator::single(&matrices::PAULI_X), &[0]).unwrap();
        dm.apply_channel(&kraus(NoiseChannel::AmplitudeDamping(1.0)), &[0]).unwrap();
        assert!((dm.get(0, 0).re - 1.0).abs() < TOL);
        assert!((dm.purity() - 1.0).abs() < TOL);
    }

    #[test]
    fn test_channel_on_one_qubit_of_two() {
        let mut dm = bell();
        dm.apply_channel(&kraus(NoiseChannel::PhaseDamping(1.0)), &[0]).unwrap();
        assert!(dm.is_valid(TOL));
        // coherence |00⟩⟨11| destroyed
        assert!(dm.get(0, 3).norm() < TOL);
        assert!((dm.purity() - 0.5).abs() < TOL);
    }

    #[test]
    fn test_operand_checks() {
        let mut dm = DensityMatrix::new(2).unwrap();
        let h = Operator::single(&matrices::HADAMARD);
        assert!(matches!(
            dm.apply_operator(&h, &[2]),
            Err(StateError::InvalidQubitIndex { index: 2, .. })
        ));
        assert!(matches!(
            dm.apply_operator(&h, &[0, 1]),
            Err(StateError::DimensionMismatch { .. })
        ));
        let cx = controlled(&matrices::PAULI_X, 1);
        assert!(matches!(
            dm.apply_operator(&cx, &[1, 1]),
            Err(StateError::DuplicateOperand { index: 1 })
        ));
    }

    #[test]
    fn test_from_state_vector_length_check() {
        let amps = vec![Complex64::new(1.0, 0.0); 3];
        assert!(DensityMatrix::from_state_vector(2, &amps).is_err());
    }
}
