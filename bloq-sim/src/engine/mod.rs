//! Evolution engine
//!
//! - [`config`]: engine limits and per-step validation switch
//! - [`instruction`]: gate compilation and arity/topology checks
//! - [`executor`]: the step loop and snapshot emission

pub mod config;
pub mod error;
pub mod executor;
pub mod instruction;

pub use config::EngineConfig;
pub use error::{Result, SimulationError};
pub use executor::{EvolutionEngine, SnapshotSimulator};
pub use instruction::{compile_circuit, compile_gate, Action, CompiledGate};
