//! Bloch vectors for single-qubit states
//!
//! A single-qubit density matrix can always be written as
//!
//! ρ = (I + x·σx + y·σy + z·σz) / 2
//!
//! where (x, y, z) = (⟨σx⟩, ⟨σy⟩, ⟨σz⟩) is the Bloch vector. Pure states lie
//! on the unit sphere, mixed states inside it.
//!
//! # Example
//!
//! ```
//! use bloq_core::BlochVector;
//!
//! // |0⟩ points to the north pole
//! assert_eq!(BlochVector::north().to_array(), [0.0, 0.0, 1.0]);
//!
//! // Components are clamped into [-1, 1]
//! let drifted = BlochVector::new(1.0000001, 0.0, -3.0);
//! assert_eq!(drifted.x(), 1.0);
//! assert_eq!(drifted.z(), -1.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cartesian point in the Bloch ball, each component in `[-1, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct BlochVector {
    x: f64,
    y: f64,
    z: f64,
}

impl BlochVector {
    /// Create a Bloch vector, clamping each component into `[-1, 1]`
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
            z: z.clamp(-1.0, 1.0),
        }
    }

    /// The |0⟩ state
    pub fn north() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean norm; 1 for pure states, < 1 for mixed states
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Dot product with an arbitrary direction
    pub fn dot(&self, axis: [f64; 3]) -> f64 {
        self.x * axis[0] + self.y * axis[1] + self.z * axis[2]
    }
}

impl Default for BlochVector {
    fn default() -> Self {
        Self::north()
    }
}

impl From<[f64; 3]> for BlochVector {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<BlochVector> for [f64; 3] {
    fn from(v: BlochVector) -> Self {
        v.to_array()
    }
}

impl fmt::Display for BlochVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}
