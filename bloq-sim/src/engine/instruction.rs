//! Gate compilation
//!
//! Each [`Gate`] is turned into a list of [`Action`]s before evolution
//! starts, so an invalid gate anywhere in the circuit is reported before a
//! single matrix multiplication happens.

use bloq_core::{AnnotationKind, Circuit, Gate, GateKind, QuantumError, Result};
use bloq_gates::{controlled, single_qubit_matrix, Operator};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// One primitive applied to the state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Unitary with operand `i` bound to `qubits[i]` (target first, then controls)
    Unitary {
        operator: Operator,
        qubits: SmallVec<[usize; 3]>,
    },
    /// Reset channel on one qubit
    Reset { qubit: usize },
    /// Marker with no effect on the state
    Annotation(AnnotationKind),
}

/// A validated gate ready for evolution
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledGate {
    pub kind: GateKind,
    pub actions: Vec<Action>,
    /// Snapshot metadata: `gate`, `targets`, `controls`
    pub metadata: BTreeMap<String, String>,
}

impl CompiledGate {
    /// Whether any action resets a qubit
    pub fn resets(&self) -> bool {
        self.actions
            .iter()
            .any(|action| matches!(action, Action::Reset { .. }))
    }
}

/// Compile every gate of `circuit`, failing on the first invalid one
pub fn compile_circuit(circuit: &Circuit) -> Result<Vec<CompiledGate>> {
    circuit.validate()?;
    circuit.gates().iter().map(compile_gate).collect()
}

/// Validate a single gate and build its actions
pub fn compile_gate(gate: &Gate) -> Result<CompiledGate> {
    let kind = gate.kind()?;
    let targets = gate.targets();
    let controls = gate.controls();

    let actions = match kind {
        GateKind::Annotation(annotation) => vec![Action::Annotation(annotation)],
        GateKind::Cx | GateKind::Cz => {
            if targets.len() != 1 || controls.len() != 1 {
                return Err(QuantumError::invalid_arity(
                    gate.name(),
                    (1, 1),
                    (targets.len(), controls.len()),
                ));
            }
            check_topology(gate)?;

            let matrix = single_qubit_matrix(kind, gate.parameters())?;
            vec![Action::Unitary {
                operator: controlled(&matrix, 1),
                qubits: SmallVec::from_slice(&[targets[0], controls[0]]),
            }]
        }
        GateKind::Reset => {
            if targets.is_empty() || !controls.is_empty() {
                return Err(QuantumError::invalid_arity(
                    gate.name(),
                    (targets.len().max(1), 0),
                    (targets.len(), controls.len()),
                ));
            }
            check_topology(gate)?;
            targets
                .iter()
                .map(|&qubit| Action::Reset { qubit })
                .collect()
        }
        _ => {
            if targets.is_empty() {
                return Err(QuantumError::invalid_arity(
                    gate.name(),
                    (1, controls.len()),
                    (0, controls.len()),
                ));
            }
            check_topology(gate)?;

            let matrix = single_qubit_matrix(kind, gate.parameters())?;
            let operator = if controls.is_empty() {
                Operator::single(&matrix)
            } else {
                controlled(&matrix, controls.len())
            };

            targets
                .iter()
                .map(|&target| {
                    let mut qubits = SmallVec::with_capacity(1 + controls.len());
                    qubits.push(target);
                    qubits.extend_from_slice(controls);
                    Action::Unitary {
                        operator: operator.clone(),
                        qubits,
                    }
                })
                .collect()
        }
    };

    Ok(CompiledGate {
        kind,
        actions,
        metadata: step_metadata(gate),
    })
}

/// Reject repeated indices within or across targets and controls
fn check_topology(gate: &Gate) -> Result<()> {
    let mut seen: SmallVec<[usize; 4]> = SmallVec::new();
    for qubit in gate.qubits() {
        if seen.contains(&qubit) {
            return Err(QuantumError::invalid_topology(gate.name(), qubit));
        }
        seen.push(qubit);
    }
    Ok(())
}

fn step_metadata(gate: &Gate) -> BTreeMap<String, String> {
    let join = |indices: &[usize]| {
        indices
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(",")
    };

    BTreeMap::from([
        ("gate".to_string(), gate.name().to_string()),
        ("targets".to_string(), join(gate.targets())),
        ("controls".to_string(), join(gate.controls())),
    ])
}
