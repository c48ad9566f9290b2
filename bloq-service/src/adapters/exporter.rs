//! OpenQASM 3 and JSON export

use crate::ports::SnapshotExporter;
use anyhow::Result;
use async_trait::async_trait;
use bloq_core::{Circuit, Gate, GateKind, Snapshot};
use bloq_sim::compile_gate;
use num_complex::Complex64;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Exporter producing OpenQASM 3 text and a pretty-printed JSON snapshot array
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardExporter;

impl StandardExporter {
    pub fn new() -> Self {
        Self
    }

    /// Render `circuit` as an OpenQASM 3 program
    ///
    /// Annotation pseudo-gates become comments.
    pub fn to_qasm(circuit: &Circuit) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "OPENQASM 3.0;")?;
        writeln!(out, "include \"stdgates.inc\";")?;
        writeln!(out, "qubit[{}] q;", circuit.qubit_count())?;
        if let Some(phase) = circuit.global_phase().filter(|p| *p != 0.0) {
            writeln!(out, "gphase({});", phase)?;
        }

        for gate in circuit.gates() {
            write_gate(&mut out, gate)?;
        }
        Ok(out)
    }

    /// Render snapshots as a JSON array
    pub fn to_json(snapshots: &[Snapshot]) -> Result<String> {
        let entries: Vec<SnapshotEntry<'_>> = snapshots.iter().map(SnapshotEntry::from).collect();
        Ok(serde_json::to_string_pretty(&entries)?)
    }
}

#[async_trait]
impl SnapshotExporter for StandardExporter {
    async fn export_qasm(&self, circuit: &Circuit) -> Result<String> {
        Self::to_qasm(circuit)
    }

    async fn export_json(&self, snapshots: &[Snapshot]) -> Result<String> {
        Self::to_json(snapshots)
    }
}

fn write_gate(out: &mut String, gate: &Gate) -> Result<()> {
    let compiled = compile_gate(gate)?;
    let operand = |q: &usize| format!("q[{}]", q);
    let angle = gate.parameters().first().copied().unwrap_or(0.0);

    let base = match compiled.kind {
        GateKind::Annotation(kind) => {
            let targets: Vec<String> = gate.targets().iter().map(operand).collect();
            writeln!(out, "// {} {}", kind.name().to_lowercase(), targets.join(", "))?;
            return Ok(());
        }
        GateKind::Reset => {
            for target in gate.targets() {
                writeln!(out, "reset {};", operand(target))?;
            }
            return Ok(());
        }
        GateKind::Cx | GateKind::Cz => {
            let name = if compiled.kind == GateKind::Cx { "cx" } else { "cz" };
            writeln!(
                out,
                "{} {}, {};",
                name,
                operand(&gate.controls()[0]),
                operand(&gate.targets()[0])
            )?;
            return Ok(());
        }
        GateKind::I => "id".to_string(),
        GateKind::X => "x".to_string(),
        GateKind::Y => "y".to_string(),
        GateKind::Z => "z".to_string(),
        GateKind::H => "h".to_string(),
        GateKind::S => "s".to_string(),
        GateKind::Sdg => "sdg".to_string(),
        GateKind::T => "t".to_string(),
        GateKind::Tdg => "tdg".to_string(),
        GateKind::Sx => "sx".to_string(),
        GateKind::Sxdg => "inv @ sx".to_string(),
        GateKind::Phase => format!("p({})", angle),
        GateKind::Rx => format!("rx({})", angle),
        GateKind::Ry => format!("ry({})", angle),
        GateKind::Rz => format!("rz({})", angle),
    };

    let controls: Vec<String> = gate.controls().iter().map(operand).collect();
    for target in gate.targets() {
        if controls.is_empty() {
            writeln!(out, "{} {};", base, operand(target))?;
        } else {
            writeln!(
                out,
                "ctrl({}) @ {} {}, {};",
                controls.len(),
                base,
                controls.join(", "),
                operand(target)
            )?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ComplexEntry {
    re: f64,
    im: f64,
}

impl From<&Complex64> for ComplexEntry {
    fn from(value: &Complex64) -> Self {
        Self {
            re: value.re,
            im: value.im,
        }
    }
}

#[derive(Serialize)]
struct BlochEntry {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Serialize)]
struct SnapshotEntry<'a> {
    step: usize,
    probabilities: [f64; 2],
    purity: f64,
    radius: f64,
    global_phase: Option<f64>,
    focus_qubit: usize,
    metadata: &'a BTreeMap<String, String>,
    bloch: BlochEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    statevector: Option<Vec<ComplexEntry>>,
    density_matrix: Vec<ComplexEntry>,
}

impl<'a> From<&'a Snapshot> for SnapshotEntry<'a> {
    fn from(snapshot: &'a Snapshot) -> Self {
        Self {
            step: snapshot.step,
            probabilities: snapshot.probabilities,
            purity: snapshot.purity,
            radius: snapshot.bloch_radius,
            global_phase: snapshot.global_phase,
            focus_qubit: snapshot.focus_qubit,
            metadata: &snapshot.metadata,
            bloch: BlochEntry {
                x: snapshot.bloch.x(),
                y: snapshot.bloch.y(),
                z: snapshot.bloch.z(),
            },
            statevector: snapshot
                .statevector
                .as_ref()
                .map(|amps| amps.iter().map(ComplexEntry::from).collect()),
            density_matrix: snapshot.density_matrix.iter().map(ComplexEntry::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloq_sim::{EngineConfig, EvolutionEngine};

    #[test]
    fn test_qasm_header_and_gates() {
        let circuit = Circuit::from_gates(
            2,
            [
                Gate::new("H", [0]),
                Gate::new("CNOT", [1]).with_controls([0]),
                Gate::new("RZ", [1]).with_parameters([0.5]),
                Gate::new("SX†", [0]),
                Gate::new("X", [0]).with_controls([1]),
                Gate::new("RESET", [0, 1]),
                Gate::new("MEASURE_Z", [1]),
            ],
        )
        .unwrap()
        .with_global_phase(0.25);

        let qasm = StandardExporter::to_qasm(&circuit).unwrap();
        let lines: Vec<&str> = qasm.lines().collect();
        assert_eq!(
            lines,
            vec![
                "OPENQASM 3.0;",
                "include \"stdgates.inc\";",
                "qubit[2] q;",
                "gphase(0.25);",
                "h q[0];",
                "cx q[0], q[1];",
                "rz(0.5) q[1];",
                "inv @ sx q[0];",
                "ctrl(1) @ x q[1], q[0];",
                "reset q[0];",
                "reset q[1];",
                "// measure_z q[1]",
            ]
        );
    }

    #[test]
    fn test_qasm_rejects_unknown_gate() {
        let circuit = Circuit::from_gates(1, [Gate::new("U3", [0])]).unwrap();
        assert!(StandardExporter::to_qasm(&circuit).is_err());
    }

    #[test]
    fn test_json_fields() {
        let engine = EvolutionEngine::new(EngineConfig::default()).unwrap();
        let circuit = Circuit::from_gates(1, [Gate::new("H", [0])]).unwrap();
        let snapshots = engine.simulate(&circuit, None, None).unwrap();

        let json = StandardExporter::to_json(&snapshots).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 2);

        let last = &entries[1];
        assert_eq!(last["step"], 1);
        assert_eq!(last["metadata"]["gate"], "H");
        assert!((last["bloch"]["x"].as_f64().unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(last["statevector"].as_array().unwrap().len(), 2);
        assert_eq!(last["density_matrix"].as_array().unwrap().len(), 4);
        assert!(last["density_matrix"][0]["re"].is_number());
        assert!(last["global_phase"].is_null());
    }

    #[tokio::test]
    async fn test_port_delegates() {
        let exporter = StandardExporter::new();
        let circuit = Circuit::new(1).unwrap();
        let qasm = exporter.export_qasm(&circuit).await.unwrap();
        assert!(qasm.starts_with("OPENQASM 3.0;"));
        assert_eq!(exporter.export_json(&[]).await.unwrap(), "[]");
    }
}
