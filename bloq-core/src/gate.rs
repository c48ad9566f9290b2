//! Gate instructions and the supported gate vocabulary

use crate::{QuantumError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;

/// Metadata-only pseudo-gates
///
/// These are recognized by the engine but never touch the state. They mark
/// where downstream consumers should draw noise or measurement annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationKind {
    Depolarizing,
    AmplitudeDamping,
    PhaseDamping,
    MeasureX,
    MeasureY,
    MeasureZ,
}

impl AnnotationKind {
    /// Canonical upper-case name
    pub const fn name(&self) -> &'static str {
        match self {
            AnnotationKind::Depolarizing => "DEPOLARIZING",
            AnnotationKind::AmplitudeDamping => "AMP_DAMP",
            AnnotationKind::PhaseDamping => "PHASE_DAMP",
            AnnotationKind::MeasureX => "MEASURE_X",
            AnnotationKind::MeasureY => "MEASURE_Y",
            AnnotationKind::MeasureZ => "MEASURE_Z",
        }
    }
}

/// The fixed gate vocabulary
///
/// Parsing is case-insensitive and accepts the common aliases
/// (`CNOT`, `SDG`, `TDG`, `SXDG`, `ID`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    I,
    X,
    Y,
    Z,
    H,
    S,
    Sdg,
    T,
    Tdg,
    Sx,
    Sxdg,
    /// Phase gate P(θ)
    Phase,
    Rx,
    Ry,
    Rz,
    Cx,
    Cz,
    Reset,
    Annotation(AnnotationKind),
}

impl GateKind {
    /// Resolve a gate name against the vocabulary
    ///
    /// # Errors
    /// Returns [`QuantumError::UnsupportedGate`] for unknown names
    ///
    /// # Example
    /// ```
    /// use bloq_core::GateKind;
    ///
    /// assert_eq!(GateKind::from_name("cnot").unwrap(), GateKind::Cx);
    /// assert_eq!(GateKind::from_name("S†").unwrap(), GateKind::Sdg);
    /// assert!(GateKind::from_name("TOFFOLI").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        let kind = match name.trim().to_uppercase().as_str() {
            "I" | "ID" => GateKind::I,
            "X" => GateKind::X,
            "Y" => GateKind::Y,
            "Z" => GateKind::Z,
            "H" => GateKind::H,
            "S" => GateKind::S,
            "SDG" | "S†" => GateKind::Sdg,
            "T" => GateKind::T,
            "TDG" | "T†" => GateKind::Tdg,
            "SX" => GateKind::Sx,
            "SXDG" | "SX†" => GateKind::Sxdg,
            "P" => GateKind::Phase,
            "RX" => GateKind::Rx,
            "RY" => GateKind::Ry,
            "RZ" => GateKind::Rz,
            "CX" | "CNOT" => GateKind::Cx,
            "CZ" => GateKind::Cz,
            "RESET" => GateKind::Reset,
            "DEPOLARIZING" => GateKind::Annotation(AnnotationKind::Depolarizing),
            "AMP_DAMP" => GateKind::Annotation(AnnotationKind::AmplitudeDamping),
            "PHASE_DAMP" => GateKind::Annotation(AnnotationKind::PhaseDamping),
            "MEASURE_X" => GateKind::Annotation(AnnotationKind::MeasureX),
            "MEASURE_Y" => GateKind::Annotation(AnnotationKind::MeasureY),
            "MEASURE_Z" => GateKind::Annotation(AnnotationKind::MeasureZ),
            _ => return Err(QuantumError::unsupported_gate(name)),
        };
        Ok(kind)
    }

    /// Canonical name
    pub const fn name(&self) -> &'static str {
        match self {
            GateKind::I => "I",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::H => "H",
            GateKind::S => "S",
            GateKind::Sdg => "SDG",
            GateKind::T => "T",
            GateKind::Tdg => "TDG",
            GateKind::Sx => "SX",
            GateKind::Sxdg => "SXDG",
            GateKind::Phase => "P",
            GateKind::Rx => "RX",
            GateKind::Ry => "RY",
            GateKind::Rz => "RZ",
            GateKind::Cx => "CX",
            GateKind::Cz => "CZ",
            GateKind::Reset => "RESET",
            GateKind::Annotation(kind) => kind.name(),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A frozen gate instruction
///
/// Gates are built once with the `with_*` builders and never mutated
/// afterwards. The name is kept verbatim; it is resolved against the
/// vocabulary by [`Gate::kind`] when the circuit is simulated, so an
/// unknown name only fails at simulation time.
///
/// # Example
/// ```
/// use bloq_core::{Gate, GateKind};
///
/// let rx = Gate::new("RX", [0]).with_parameters([std::f64::consts::PI]);
/// assert_eq!(rx.kind().unwrap(), GateKind::Rx);
/// assert_eq!(rx.parameters(), &[std::f64::consts::PI]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    name: String,
    targets: SmallVec<[usize; 2]>,
    #[serde(default)]
    controls: SmallVec<[usize; 2]>,
    #[serde(default)]
    parameters: SmallVec<[f64; 2]>,
    #[serde(default)]
    metadata: BTreeMap<String, String>,
}

impl Gate {
    /// Create a gate acting on the given targets
    pub fn new(name: impl Into<String>, targets: impl IntoIterator<Item = usize>) -> Self {
        Self {
            name: name.into(),
            targets: targets.into_iter().collect(),
            controls: SmallVec::new(),
            parameters: SmallVec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Builder: set the control qubits
    pub fn with_controls(mut self, controls: impl IntoIterator<Item = usize>) -> Self {
        self.controls = controls.into_iter().collect();
        self
    }

    /// Builder: set the rotation angles (radians)
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = f64>) -> Self {
        self.parameters = parameters.into_iter().collect();
        self
    }

    /// Builder: attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Name as supplied by the caller
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    #[inline]
    pub fn controls(&self) -> &[usize] {
        &self.controls
    }

    #[inline]
    pub fn parameters(&self) -> &[f64] {
        &self.parameters
    }

    #[inline]
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Resolve the gate name against the vocabulary
    pub fn kind(&self) -> Result<GateKind> {
        GateKind::from_name(&self.name)
    }

    /// All qubits touched by the gate, targets first
    pub fn qubits(&self) -> impl Iterator<Item = usize> + '_ {
        self.targets.iter().chain(self.controls.iter()).copied()
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.parameters.is_empty() {
            write!(f, "(")?;
            for (i, p) in self.parameters.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.4}", p)?;
            }
            write!(f, ")")?;
        }
        write!(f, " ")?;
        for (i, q) in self.targets.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "q{}", q)?;
        }
        if !self.controls.is_empty() {
            write!(f, " ctrl")?;
            for q in &self.controls {
                write!(f, " q{}", q)?;
            }
        }
        Ok(())
    }
}
