//! Gate matrices for bloq
//!
//! Every gate in the bloq vocabulary acts on at most two qubits, so all
//! unitaries are small fixed matrices (≤4×4). Fixed gates are compile-time
//! constants in [`matrices`]; parameterized rotations and controlled
//! versions are built in [`standard`].
//!
//! # Example
//!
//! ```
//! use bloq_core::GateKind;
//! use bloq_gates::standard::{controlled, single_qubit_matrix};
//!
//! let x = single_qubit_matrix(GateKind::X, &[]).unwrap();
//! let cx = controlled(&x, 1);
//! assert_eq!(cx.dimension(), 4);
//! ```

pub mod matrices;
pub mod standard;

pub use standard::{controlled, reset_kraus, single_qubit_matrix, Matrix2, Operator};
