//! Per-step simulation snapshots

use crate::BlochVector;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// State of the circuit after one step
///
/// Step 0 is the initial |0…0⟩ state; step `k` is the state after the k-th
/// gate. The full density matrix is always present (row-major,
/// `2^n × 2^n`); the state vector is present only while the evolution has
/// stayed pure, i.e. before any noise channel or multi-qubit reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub step: usize,
    pub statevector: Option<Vec<Complex64>>,
    pub density_matrix: Vec<Complex64>,
    /// Bloch vector of the focus qubit's reduced state
    pub bloch: BlochVector,
    /// `(P(0), P(1))` for the focus qubit
    pub probabilities: [f64; 2],
    pub purity: f64,
    pub bloch_radius: f64,
    pub focus_qubit: usize,
    pub global_phase: Option<f64>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Snapshot {
    /// Whether the pure-state track was still valid at this step
    #[inline]
    pub fn is_pure_track(&self) -> bool {
        self.statevector.is_some()
    }

    /// Name of the gate that produced this step (`INIT` for step 0)
    pub fn gate_name(&self) -> Option<&str> {
        self.metadata.get("gate").map(String::as_str)
    }
}
