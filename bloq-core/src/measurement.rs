//! Projective measurement axes and sampled results

use crate::{QuantumError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measurement axis on the Bloch sphere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MeasurementAxis {
    X,
    Y,
    #[default]
    Z,
}

impl MeasurementAxis {
    /// Unit vector along the axis
    pub const fn unit_vector(&self) -> [f64; 3] {
        match self {
            MeasurementAxis::X => [1.0, 0.0, 0.0],
            MeasurementAxis::Y => [0.0, 1.0, 0.0],
            MeasurementAxis::Z => [0.0, 0.0, 1.0],
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            MeasurementAxis::X => "X",
            MeasurementAxis::Y => "Y",
            MeasurementAxis::Z => "Z",
        }
    }
}

impl FromStr for MeasurementAxis {
    type Err = QuantumError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "X" => Ok(MeasurementAxis::X),
            "Y" => Ok(MeasurementAxis::Y),
            "Z" => Ok(MeasurementAxis::Z),
            other => Err(QuantumError::ValidationError(format!(
                "Unknown measurement axis '{}', expected X, Y or Z",
                other
            ))),
        }
    }
}

impl fmt::Display for MeasurementAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One projective outcome along the measurement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Plus,
    Minus,
}

impl Outcome {
    /// Numeric encoding: `+1` / `−1`
    pub const fn value(&self) -> f64 {
        match self {
            Outcome::Plus => 1.0,
            Outcome::Minus => -1.0,
        }
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            Outcome::Plus => "plus",
            Outcome::Minus => "minus",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub plus: usize,
    pub minus: usize,
}

impl OutcomeCounts {
    pub fn total(&self) -> usize {
        self.plus + self.minus
    }

    /// Outcome with the most counts; ties favour `Plus`
    pub fn majority(&self) -> Outcome {
        if self.plus >= self.minus {
            Outcome::Plus
        } else {
            Outcome::Minus
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    pub plus: f64,
    pub minus: f64,
}

/// Result of sampling `shots` draws from a reduced single-qubit state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Snapshot step the samples were drawn from
    pub step: usize,
    pub axis: MeasurementAxis,
    pub shots: usize,
    pub counts: OutcomeCounts,
    pub probabilities: OutcomeProbabilities,
    /// Axis direction pointing towards the majority outcome
    pub overlay_vector: [f64; 3],
    pub samples: Vec<Outcome>,
    pub mean: f64,
    pub standard_deviation: f64,
    pub longest_run: usize,
    /// `None` only when no samples were drawn
    pub longest_symbol: Option<Outcome>,
    pub switches: usize,
}

impl MeasurementResult {
    /// Attach the snapshot step the result belongs to
    pub fn at_step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }
}
