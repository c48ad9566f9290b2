//! Kraus representations of the supported noise channels

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A single-qubit Kraus operator (2×2, row-major)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KrausOperator([[Complex64; 2]; 2]);

impl KrausOperator {
    pub const fn new(matrix: [[Complex64; 2]; 2]) -> Self {
        Self(matrix)
    }

    /// Real diagonal operator diag(a, b)
    pub const fn diagonal(a: f64, b: f64) -> Self {
        Self([[Complex64::new(a, 0.0), ZERO], [ZERO, Complex64::new(b, 0.0)]])
    }

    #[inline]
    pub fn matrix(&self) -> &[[Complex64; 2]; 2] {
        &self.0
    }

    /// Row-major flattened copy
    pub fn to_vec(&self) -> Vec<Complex64> {
        self.0.iter().flatten().copied().collect()
    }

    fn scaled(matrix: [[Complex64; 2]; 2], factor: f64) -> Self {
        Self(matrix.map(|row| row.map(|z| z * factor)))
    }

    /// K†K
    fn gram(&self) -> [[Complex64; 2]; 2] {
        let k = &self.0;
        let mut out = [[ZERO; 2]; 2];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..2).map(|m| k[m][i].conj() * k[m][j]).sum();
            }
        }
        out
    }
}

/// Largest entry of |Σ Kᵢ†Kᵢ − I|; zero for a trace-preserving set
pub fn completeness_defect(operators: &[KrausOperator]) -> f64 {
    let mut sum = [[ZERO; 2]; 2];
    for op in operators {
        let gram = op.gram();
        for i in 0..2 {
            for j in 0..2 {
                sum[i][j] += gram[i][j];
            }
        }
    }
    let mut defect: f64 = 0.0;
    for (i, row) in sum.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            let expected = if i == j { ONE } else { ZERO };
            defect = defect.max((cell - expected).norm());
        }
    }
    defect
}

/// The closed set of noise channels
///
/// Each variant carries its strength; [`NoiseChannel::kraus_operators`]
/// clamps it into `[0, 1]` before building the operators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NoiseChannel {
    /// `{√(1−3p/4)·I, √(p/4)·X, √(p/4)·Y, √(p/4)·Z}`
    Depolarizing(f64),
    /// `{diag(1, √(1−γ)), [[0, √γ], [0, 0]]}`
    AmplitudeDamping(f64),
    /// `{√(1−λ)·I, diag(√λ, 0), diag(0, √λ)}`
    PhaseDamping(f64),
}

impl NoiseChannel {
    /// Raw (unclamped) strength
    pub fn strength(&self) -> f64 {
        match *self {
            NoiseChannel::Depolarizing(p) => p,
            NoiseChannel::AmplitudeDamping(gamma) => gamma,
            NoiseChannel::PhaseDamping(lambda) => lambda,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NoiseChannel::Depolarizing(_) => "depolarizing",
            NoiseChannel::AmplitudeDamping(_) => "amplitude_damping",
            NoiseChannel::PhaseDamping(_) => "phase_damping",
        }
    }

    /// Kraus set for the channel
    pub fn kraus_operators(&self) -> Vec<KrausOperator> {
        let s = self.strength().clamp(0.0, 1.0);
        match self {
            NoiseChannel::Depolarizing(_) => {
                let keep = (1.0 - 0.75 * s).max(0.0).sqrt();
                let flip = (s / 4.0).sqrt();
                vec![
                    KrausOperator::scaled([[ONE, ZERO], [ZERO, ONE]], keep),
                    KrausOperator::scaled([[ZERO, ONE], [ONE, ZERO]], flip),
                    KrausOperator::scaled(
                        [[ZERO, Complex64::new(0.0, -1.0)], [Complex64::new(0.0, 1.0), ZERO]],
                        flip,
                    ),
                    KrausOperator::scaled([[ONE, ZERO], [ZERO, -ONE]], flip),
                ]
            }
            NoiseChannel::AmplitudeDamping(_) => vec![
                KrausOperator::diagonal(1.0, (1.0 - s).max(0.0).sqrt()),
                KrausOperator::new([[ZERO, Complex64::new(s.sqrt(), 0.0)], [ZERO, ZERO]]),
            ],
            NoiseChannel::PhaseDamping(_) => {
                let keep = (1.0 - s).max(0.0).sqrt();
                let dephase = s.sqrt();
                vec![
                    KrausOperator::diagonal(keep, keep),
                    KrausOperator::diagonal(dephase, 0.0),
                    KrausOperator::diagonal(0.0, dephase),
                ]
            }
        }
    }
}
