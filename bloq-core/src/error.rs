//! Error types for bloq

use thiserror::Error;

/// Errors raised while building or validating circuits and gates
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    /// Gate name outside the supported vocabulary
    #[error("Unsupported gate: {gate}")]
    UnsupportedGate { gate: String },

    /// Wrong number of targets or controls for a gate
    #[error(
        "Gate '{gate}' expects {expected_targets} target(s) and {expected_controls} control(s), \
         got {targets} target(s) and {controls} control(s)"
    )]
    InvalidGateArity {
        gate: String,
        expected_targets: usize,
        expected_controls: usize,
        targets: usize,
        controls: usize,
    },

    /// Control and target sets overlap, or an index repeats
    #[error("Gate '{gate}' uses qubit {qubit} more than once across targets and controls")]
    InvalidGateTopology { gate: String, qubit: usize },

    /// Target or control outside the circuit
    #[error("Invalid qubit index {0}: circuit has only {1} qubits")]
    InvalidQubitIndex(usize, usize),

    /// Parameterized gate without its angle
    #[error("Gate '{gate}' requires a rotation angle")]
    MissingParameter { gate: String },

    /// Circuit has no qubits
    #[error("Circuit must have at least one qubit")]
    EmptyCircuit,

    /// Generic validation error
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl QuantumError {
    /// Create an unsupported gate error
    pub fn unsupported_gate(gate: impl Into<String>) -> Self {
        Self::UnsupportedGate { gate: gate.into() }
    }

    /// Create an invalid qubit index error
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::InvalidQubitIndex(qubit, num_qubits)
    }

    /// Create an arity error for a gate
    pub fn invalid_arity(
        gate: impl Into<String>,
        (expected_targets, expected_controls): (usize, usize),
        (targets, controls): (usize, usize),
    ) -> Self {
        Self::InvalidGateArity {
            gate: gate.into(),
            expected_targets,
            expected_controls,
            targets,
            controls,
        }
    }

    /// Create a topology error for a gate
    pub fn invalid_topology(gate: impl Into<String>, qubit: usize) -> Self {
        Self::InvalidGateTopology {
            gate: gate.into(),
            qubit,
        }
    }
}
