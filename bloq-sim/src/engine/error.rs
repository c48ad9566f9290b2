//! Error types for the evolution engine

use bloq_core::QuantumError;
use bloq_state::StateError;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Errors that can occur while simulating a circuit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Gate or circuit rejected during compilation
    #[error(transparent)]
    Circuit(#[from] QuantumError),

    /// Linear-algebra layer failure
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Circuit exceeds the configured qubit limit
    #[error("Circuit has {requested} qubits, engine limit is {max}")]
    TooManyQubits { requested: usize, max: usize },

    /// Density matrix failed validation after a step
    #[error("Invalid state after step {step}: {reason}")]
    InvalidState { step: usize, reason: String },

    /// Engine configuration rejected
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}
