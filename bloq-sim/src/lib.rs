//! Evolution engine for 1–2 qubit circuits
//!
//! [`EvolutionEngine`] runs a [`Circuit`](bloq_core::Circuit) gate by gate,
//! evolving a density matrix (and, while no noise has been applied, a
//! parallel state vector) and emitting one [`Snapshot`](bloq_core::Snapshot)
//! per step with the focus qubit's Bloch vector, purity and probabilities.
//!
//! # Example
//!
//! ```
//! use bloq_core::{Circuit, Gate};
//! use bloq_sim::{EngineConfig, EvolutionEngine};
//!
//! let mut circuit = Circuit::new(1).unwrap();
//! circuit.append(Gate::new("H", [0])).unwrap();
//!
//! let engine = EvolutionEngine::new(EngineConfig::default()).unwrap();
//! let snapshots = engine.simulate(&circuit, None, None).unwrap();
//!
//! assert_eq!(snapshots.len(), 2);
//! assert!((snapshots[1].bloch.x() - 1.0).abs() < 1e-9);
//! ```

pub mod engine;

pub use engine::{
    compile_circuit, compile_gate, Action, CompiledGate, EngineConfig, EvolutionEngine, Result,
    SimulationError, SnapshotSimulator,
};
