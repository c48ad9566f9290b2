//! Quantum circuit representation

use crate::gate::Gate;
use crate::{QuantumError, Result};
use serde::{Deserialize, Serialize};

/// A quantum circuit
///
/// Ordered sequence of [`Gate`]s over `qubit_count` qubits with an optional
/// global phase. Every mutation checks that the gate's targets and controls
/// lie in `[0, qubit_count)`, so a constructed circuit never carries an
/// out-of-range index into the simulator.
///
/// # Example
/// ```
/// use bloq_core::{Circuit, Gate};
///
/// let mut circuit = Circuit::new(1).unwrap();
/// circuit.append(Gate::new("H", [0])).unwrap();
/// assert_eq!(circuit.qubit_count(), 1);
/// assert!(circuit.append(Gate::new("X", [3])).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCircuit")]
pub struct Circuit {
    qubit_count: usize,
    gates: Vec<Gate>,
    global_phase: Option<f64>,
}

/// Unchecked wire form, validated on deserialization
#[derive(Deserialize)]
struct RawCircuit {
    qubit_count: usize,
    #[serde(default)]
    gates: Vec<Gate>,
    #[serde(default)]
    global_phase: Option<f64>,
}

impl TryFrom<RawCircuit> for Circuit {
    type Error = QuantumError;

    fn try_from(raw: RawCircuit) -> Result<Self> {
        let mut circuit = Circuit::from_gates(raw.qubit_count, raw.gates)?;
        circuit.global_phase = raw.global_phase;
        Ok(circuit)
    }
}

impl Circuit {
    /// Create an empty circuit
    ///
    /// # Errors
    /// Returns [`QuantumError::EmptyCircuit`] if `qubit_count` is 0
    pub fn new(qubit_count: usize) -> Result<Self> {
        if qubit_count == 0 {
            return Err(QuantumError::EmptyCircuit);
        }
        Ok(Self {
            qubit_count,
            gates: Vec::new(),
            global_phase: None,
        })
    }

    /// Create a circuit from a gate list, checking every index
    pub fn from_gates(qubit_count: usize, gates: impl IntoIterator<Item = Gate>) -> Result<Self> {
        let mut circuit = Self::new(qubit_count)?;
        for gate in gates {
            circuit.append(gate)?;
        }
        Ok(circuit)
    }

    /// Builder: set the global phase (radians)
    pub fn with_global_phase(mut self, phase: f64) -> Self {
        self.global_phase = Some(phase);
        self
    }

    #[inline]
    pub const fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    #[inline]
    pub fn global_phase(&self) -> Option<f64> {
        self.global_phase
    }

    /// Number of gates
    #[inline]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Gates in application order
    #[inline]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn get(&self, index: usize) -> Option<&Gate> {
        self.gates.get(index)
    }

    /// Append a gate
    ///
    /// # Errors
    /// Returns [`QuantumError::InvalidQubitIndex`] if any target or control is out of range
    pub fn append(&mut self, gate: Gate) -> Result<()> {
        self.check_indices(&gate)?;
        self.gates.push(gate);
        Ok(())
    }

    /// Insert a gate before position `index`
    pub fn insert(&mut self, index: usize, gate: Gate) -> Result<()> {
        if index > self.gates.len() {
            return Err(QuantumError::ValidationError(format!(
                "Insert position {} out of range for circuit with {} gates",
                index,
                self.gates.len()
            )));
        }
        self.check_indices(&gate)?;
        self.gates.insert(index, gate);
        Ok(())
    }

    /// Remove and return the gate at `index`
    pub fn remove(&mut self, index: usize) -> Result<Gate> {
        if index >= self.gates.len() {
            return Err(QuantumError::ValidationError(format!(
                "Remove position {} out of range for circuit with {} gates",
                index,
                self.gates.len()
            )));
        }
        Ok(self.gates.remove(index))
    }

    /// Remove all gates, keeping qubit count and phase
    pub fn clear(&mut self) {
        self.gates.clear();
    }

    /// Re-check every gate index
    pub fn validate(&self) -> Result<()> {
        self.gates.iter().try_for_each(|gate| self.check_indices(gate))
    }

    fn check_indices(&self, gate: &Gate) -> Result<()> {
        match gate.qubits().find(|&q| q >= self.qubit_count) {
            Some(q) => Err(QuantumError::invalid_qubit(q, self.qubit_count)),
            None => Ok(()),
        }
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Circuit({} qubits, {} gates)", self.qubit_count, self.len())?;
        if let Some(phase) = self.global_phase {
            writeln!(f, "  global phase: {:.4}", phase)?;
        }
        for (i, gate) in self.gates.iter().enumerate() {
            writeln!(f, "  {}: {}", i, gate)?;
        }
        Ok(())
    }
}
