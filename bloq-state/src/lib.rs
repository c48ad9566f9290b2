//! Quantum state representations for bloq
//!
//! This crate provides the numerical layer of the simulator:
//!
//! - [`DensityMatrix`]: mixed-state evolution under unitaries and Kraus channels,
//!   partial trace and purity
//! - [`PureState`]: the parallel state-vector track used while evolution is noise-free
//! - [`reduction`]: reduction of an n-qubit density matrix to one qubit's Bloch vector
//! - [`measurement`]: seeded projective sampling along X, Y or Z with run statistics
//!
//! # Example
//!
//! ```
//! use bloq_gates::{matrices, Operator};
//! use bloq_state::{reduction::reduce, DensityMatrix};
//!
//! let mut rho = DensityMatrix::new(1).unwrap();
//! rho.apply_operator(&Operator::single(&matrices::HADAMARD), &[0]).unwrap();
//!
//! let reduced = reduce(&rho, 0).unwrap();
//! assert!((reduced.bloch.x() - 1.0).abs() < 1e-10);
//! assert!((reduced.purity - 1.0).abs() < 1e-10);
//! ```

pub mod density_matrix;
pub mod error;
pub mod measurement;
pub mod reduction;
pub mod state_vector;

pub use density_matrix::DensityMatrix;
pub use error::{Result, StateError};
pub use measurement::{analyze_runs, attenuate, axis_probabilities, sample, RunStats};
pub use reduction::{reduce, ReducedState};
pub use state_vector::PureState;
