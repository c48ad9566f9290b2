//! Reduction of a density matrix onto one focus qubit

use crate::density_matrix::DensityMatrix;
use crate::error::Result;
use bloq_core::BlochVector;

/// Single-qubit view of a (possibly larger) state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducedState {
    /// Clamped Bloch components
    pub bloch: BlochVector,
    /// `(P(0), P(1))`
    pub probabilities: [f64; 2],
    /// Tr(ρ²), unclamped
    pub purity: f64,
    /// Norm of the raw Bloch components, unclamped
    pub radius: f64,
    /// Focus qubit after clamping into range
    pub focus_qubit: usize,
}

/// Reduce `rho` onto `focus_qubit`
///
/// The focus index is clamped to the last qubit. A one-qubit state is used
/// as-is; otherwise every other qubit is traced out.
pub fn reduce(rho: &DensityMatrix, focus_qubit: usize) -> Result<ReducedState> {
    let n = rho.num_qubits();
    let focus = focus_qubit.min(n - 1);

    let reduced = if n == 1 {
        rho.clone()
    } else {
        let others: Vec<usize> = (0..n).filter(|&q| q != focus).collect();
        rho.partial_trace(&others)?
    };

    let r00 = reduced.get(0, 0);
    let r01 = reduced.get(0, 1);
    let r10 = reduced.get(1, 0);
    let r11 = reduced.get(1, 1);

    let x = 2.0 * r01.re;
    let y = 2.0 * r10.im;
    let z = (r00 - r11).re;

    Ok(ReducedState {
        bloch: BlochVector::new(x, y, z),
        probabilities: [r00.re, r11.re],
        purity: reduced.purity(),
        radius: (x * x + y * y + z * z).sqrt(),
        focus_qubit: focus,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bloq_gates::{controlled, matrices, Operator};

    fn apply(rho: &mut DensityMatrix, m: &bloq_gates::Matrix2, q: usize) {
        rho.apply_operator(&Operator::single(m), &[q]).unwrap();
    }

    #[test]
    fn test_ground_state() {
        let rho = DensityMatrix::new(1).unwrap();
        let r = reduce(&rho, 0).unwrap();
        assert_eq!(r.bloch, BlochVector::north());
        assert_relative_eq!(r.probabilities[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(r.radius, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cardinal_states() {
        // S·H|0⟩ = |+i⟩
        let mut rho = DensityMatrix::new(1).unwrap();
        apply(&mut rho, &matrices::HADAMARD, 0);
        apply(&mut rho, &matrices::S_GATE, 0);
        let r = reduce(&rho, 0).unwrap();
        assert_relative_eq!(r.bloch.y(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(r.bloch.x(), 0.0, epsilon = 1e-10);

        let mut rho = DensityMatrix::new(1).unwrap();
        apply(&mut rho, &matrices::PAULI_X, 0);
        let r = reduce(&rho, 0).unwrap();
        assert_relative_eq!(r.bloch.z(), -1.0, epsilon = 1e-10);
        assert_relative_eq!(r.probabilities[1], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_focus_selects_qubit() {
        let mut rho = DensityMatrix::new(2).unwrap();
        apply(&mut rho, &matrices::PAULI_X, 1);
        assert_relative_eq!(reduce(&rho, 0).unwrap().bloch.z(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(reduce(&rho, 1).unwrap().bloch.z(), -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_focus_is_clamped() {
        let mut rho = DensityMatrix::new(2).unwrap();
        apply(&mut rho, &matrices::PAULI_X, 1);
        let r = reduce(&rho, 7).unwrap();
        assert_eq!(r.focus_qubit, 1);
        assert_relative_eq!(r.bloch.z(), -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_entangled_qubits_are_maximally_mixed() {
        let mut rho = DensityMatrix::new(2).unwrap();
        apply(&mut rho, &matrices::HADAMARD, 0);
        rho.apply_operator(&controlled(&matrices::PAULI_X, 1), &[1, 0])
            .unwrap();

        let a = reduce(&rho, 0).unwrap();
        let b = reduce(&rho, 1).unwrap();
        assert_relative_eq!(a.purity, 0.5, epsilon = 1e-10);
        assert_relative_eq!(b.purity, 0.5, epsilon = 1e-10);
        assert_relative_eq!(a.radius, 0.0, epsilon = 1e-10);
        assert_relative_eq!(a.probabilities[0] + a.probabilities[1], 1.0, epsilon = 1e-12);
    }
}
