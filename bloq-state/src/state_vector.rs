//! Pure-state track carried alongside the density matrix
//!
//! While evolution stays noise-free the simulator keeps the amplitudes of
//! |ψ⟩ as well, so snapshots can report a statevector. Any noise channel or
//! multi-qubit reset drops this track.

use crate::density_matrix::{check_operands, DensityMatrix};
use crate::error::{Result, StateError};
use bloq_gates::Operator;
use num_complex::Complex64;

/// Quantum state vector in little-endian qubit order
///
/// # Example
///
/// ```
/// use bloq_state::PureState;
///
/// let state = PureState::new(2).unwrap();
/// assert_eq!(state.num_qubits(), 2);
/// assert_eq!(state.dimension(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PureState {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl PureState {
    /// Create a state initialized to |0...0⟩
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 || num_qubits > 30 {
            return Err(StateError::InvalidDimension {
                dimension: num_qubits,
            });
        }

        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// L2 norm of the amplitudes
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(|a| a.norm_sqr())
            .sum::<f64>()
            .sqrt()
    }

    /// Multiply every amplitude by e^{iφ}
    pub fn apply_global_phase(&mut self, phase: f64) {
        let factor = Complex64::from_polar(1.0, phase);
        for amplitude in &mut self.amplitudes {
            *amplitude *= factor;
        }
    }

    /// Apply `op` with operand `i` bound to `qubits[i]`
    ///
    /// Each block of 2^k amplitudes sharing the untouched bits is gathered,
    /// multiplied and scattered back.
    pub fn apply_operator(&mut self, op: &Operator, qubits: &[usize]) -> Result<()> {
        check_operands(self.num_qubits, op, qubits)?;

        let mask = qubits.iter().fold(0usize, |m, &q| m | (1 << q));
        let block = op.dimension();
        let mut indices = vec![0usize; block];
        let mut gathered = vec![Complex64::new(0.0, 0.0); block];

        for base in (0..self.dimension()).filter(|i| i & mask == 0) {
            for (local, slot) in indices.iter_mut().enumerate() {
                *slot = qubits
                    .iter()
                    .enumerate()
                    .fold(base, |acc, (bit, &q)| acc | (((local >> bit) & 1) << q));
            }

            for (slot, &index) in gathered.iter_mut().zip(&indices) {
                *slot = self.amplitudes[index];
            }
            for (row, &index) in indices.iter().enumerate() {
                self.amplitudes[index] = gathered
                    .iter()
                    .enumerate()
                    .map(|(col, amp)| op.get(row, col) * amp)
                    .sum();
            }
        }

        Ok(())
    }

    /// Outer product |ψ⟩⟨ψ|
    pub fn to_density(&self) -> Result<DensityMatrix> {
        DensityMatrix::from_state_vector(self.num_qubits, &self.amplitudes)
    }
}
