//! Unitary construction for the bloq gate vocabulary

use crate::matrices;
use bloq_core::{GateKind, QuantumError, Result};
use num_complex::Complex64;

/// Row-major single-qubit matrix
pub type Matrix2 = [[Complex64; 2]; 2];

/// Row-major operator on `k` operand qubits
///
/// Bit `i` of a row or column index is the basis value of the `i`-th
/// operand qubit, so operand 0 is the least significant bit. Controlled
/// operators built by [`controlled`] use operand 0 as the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    num_qubits: usize,
    matrix: Vec<Complex64>,
}

impl Operator {
    /// Wrap a single-qubit matrix
    pub fn single(matrix: &Matrix2) -> Self {
        Self {
            num_qubits: 1,
            matrix: matrix.iter().flatten().copied().collect(),
        }
    }

    /// Wrap a flattened `2^k × 2^k` matrix
    ///
    /// `None` if the length is wrong or `2^k × 2^k` is not addressable.
    pub fn from_vec(num_qubits: usize, matrix: Vec<Complex64>) -> Option<Self> {
        if num_qubits >= usize::BITS as usize / 2 {
            return None;
        }
        let dim = 1usize << num_qubits;
        (matrix.len() == dim * dim).then_some(Self { num_qubits, matrix })
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        1 << self.num_qubits
    }

    #[inline]
    pub fn matrix(&self) -> &[Complex64] {
        &self.matrix
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * self.dimension() + col]
    }

    /// Check U†U = I within `tolerance`
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        let dim = self.dimension();
        (0..dim).all(|i| {
            (0..dim).all(|j| {
                let entry: Complex64 = (0..dim).map(|k| self.get(k, i).conj() * self.get(k, j)).sum();
                let expected = if i == j { 1.0 } else { 0.0 };
                (entry - expected).norm() < tolerance
            })
        })
    }
}

/// P(θ) = diag(1, e^{iθ})
pub fn phase(theta: f64) -> Matrix2 {
    let zero = Complex64::new(0.0, 0.0);
    [[Complex64::new(1.0, 0.0), zero], [zero, Complex64::from_polar(1.0, theta)]]
}

/// RX(θ) = [[cos θ/2, −i sin θ/2], [−i sin θ/2, cos θ/2]]
pub fn rotation_x(theta: f64) -> Matrix2 {
    let (s, c) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(c, 0.0), Complex64::new(0.0, -s)],
        [Complex64::new(0.0, -s), Complex64::new(c, 0.0)],
    ]
}

/// RY(θ) = [[cos θ/2, −sin θ/2], [sin θ/2, cos θ/2]]
pub fn rotation_y(theta: f64) -> Matrix2 {
    let (s, c) = (theta / 2.0).sin_cos();
    [
        [Complex64::new(c, 0.0), Complex64::new(-s, 0.0)],
        [Complex64::new(s, 0.0), Complex64::new(c, 0.0)],
    ]
}

/// RZ(θ) = diag(e^{−iθ/2}, e^{iθ/2})
pub fn rotation_z(theta: f64) -> Matrix2 {
    let zero = Complex64::new(0.0, 0.0);
    [
        [Complex64::from_polar(1.0, -theta / 2.0), zero],
        [zero, Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

/// Matrix applied to each target of a gate
///
/// For CX and CZ this is the action on the target (X and Z); the control
/// is added by [`controlled`].
///
/// # Errors
/// - [`QuantumError::MissingParameter`] for RX/RY/RZ without an angle
/// - [`QuantumError::ValidationError`] for RESET and annotations, which have no unitary
pub fn single_qubit_matrix(kind: GateKind, parameters: &[f64]) -> Result<Matrix2> {
    let angle = || {
        parameters.first().copied().ok_or_else(|| QuantumError::MissingParameter {
            gate: kind.name().to_string(),
        })
    };

    let matrix = match kind {
        GateKind::I => matrices::IDENTITY,
        GateKind::X | GateKind::Cx => matrices::PAULI_X,
        GateKind::Y => matrices::PAULI_Y,
        GateKind::Z | GateKind::Cz => matrices::PAULI_Z,
        GateKind::H => matrices::HADAMARD,
        GateKind::S => matrices::S_GATE,
        GateKind::Sdg => matrices::S_GATE_DAGGER,
        GateKind::T => matrices::T_GATE,
        GateKind::Tdg => matrices::T_GATE_DAGGER,
        GateKind::Sx => matrices::SX_GATE,
        GateKind::Sxdg => matrices::SX_GATE_DAGGER,
        GateKind::Phase => phase(parameters.first().copied().unwrap_or(0.0)),
        GateKind::Rx => rotation_x(angle()?),
        GateKind::Ry => rotation_y(angle()?),
        GateKind::Rz => rotation_z(angle()?),
        GateKind::Reset | GateKind::Annotation(_) => {
            return Err(QuantumError::ValidationError(format!(
                "Gate '{}' has no unitary matrix",
                kind
            )))
        }
    };
    Ok(matrix)
}

/// Controlled version of `target` with `num_controls` controls
///
/// Operand 0 is the target, operands `1..=num_controls` are the controls.
/// The target matrix is applied only when every control is |1⟩.
pub fn controlled(target: &Matrix2, num_controls: usize) -> Operator {
    let num_qubits = num_controls + 1;
    let dim = 1usize << num_qubits;
    let all_set = (1usize << num_controls) - 1;

    let mut matrix = vec![Complex64::new(0.0, 0.0); dim * dim];
    for row in 0..dim {
        for col in 0..dim {
            let (row_ctrl, col_ctrl) = (row >> 1, col >> 1);
            if row_ctrl != col_ctrl {
                continue;
            }
            matrix[row * dim + col] = if row_ctrl == all_set {
                target[row & 1][col & 1]
            } else if row == col {
                Complex64::new(1.0, 0.0)
            } else {
                Complex64::new(0.0, 0.0)
            };
        }
    }

    Operator { num_qubits, matrix }
}

/// Kraus pair of the reset channel: `{|0⟩⟨0|, |0⟩⟨1|}`
pub fn reset_kraus() -> [Matrix2; 2] {
    [matrices::RESET_KEEP, matrices::RESET_DECAY]
}
