//! Core types for the bloq Bloch-sphere simulator
//!
//! This crate provides the data model shared by every other bloq crate:
//! - [`Gate`] and [`GateKind`]: frozen gate instructions and the fixed gate vocabulary
//! - [`Circuit`]: ordered, index-checked gate container
//! - [`NoiseConfig`] and [`NoiseChannel`]: per-request noise strengths and their Kraus sets
//! - [`BlochVector`], [`Snapshot`], [`MeasurementResult`]: simulation outputs
//!
//! # Example
//! ```
//! use bloq_core::{Circuit, Gate};
//!
//! let mut circuit = Circuit::new(2).unwrap();
//! circuit.append(Gate::new("H", [0])).unwrap();
//! circuit.append(Gate::new("CX", [1]).with_controls([0])).unwrap();
//! assert_eq!(circuit.len(), 2);
//! ```

pub mod bloch_sphere;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod measurement;
pub mod noise;
pub mod snapshot;

// Re-exports for convenience
pub use bloch_sphere::BlochVector;
pub use circuit::Circuit;
pub use error::QuantumError;
pub use gate::{AnnotationKind, Gate, GateKind};
pub use measurement::{MeasurementAxis, MeasurementResult, Outcome, OutcomeCounts, OutcomeProbabilities};
pub use noise::{KrausOperator, NoiseChannel, NoiseConfig};
pub use num_complex::Complex64;
pub use snapshot::Snapshot;

/// Type alias for results in bloq
pub type Result<T> = std::result::Result<T, QuantumError>;
