//! Step-by-step evolution

use bloq_core::{Circuit, NoiseConfig, Snapshot};
use bloq_gates::{reset_kraus, Operator};
use bloq_state::{reduce, DensityMatrix, PureState};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, trace};

use crate::engine::{
    config::EngineConfig,
    error::{Result, SimulationError},
    instruction::{compile_circuit, Action, CompiledGate},
};

/// Anything that can turn a circuit into per-step snapshots
///
/// The snapshot service depends on this seam rather than on the concrete
/// engine.
pub trait SnapshotSimulator: Send + Sync {
    /// Produce `circuit.len() + 1` snapshots, step 0 being |0…0⟩
    fn simulate(
        &self,
        circuit: &Circuit,
        noise: Option<&NoiseConfig>,
        focus_qubit: Option<usize>,
    ) -> Result<Vec<Snapshot>>;
}

/// Density-matrix evolution engine
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    config: EngineConfig,
    reset_ops: Vec<Operator>,
}

/// Running state of one simulation
struct Evolution {
    rho: DensityMatrix,
    /// Dropped for good once noise or a multi-qubit reset is applied
    pure: Option<PureState>,
}

impl EvolutionEngine {
    /// Create an engine, rejecting an invalid configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate().map_err(SimulationError::InvalidConfig)?;
        Ok(Self {
            config,
            reset_ops: reset_kraus().iter().map(Operator::single).collect(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evolve `circuit` and return one snapshot per step
    ///
    /// A `focus_qubit` that is absent or out of range resolves to qubit 0.
    /// Noise channels (when `noise` is enabled) are applied to every qubit
    /// after each gate, in the order depolarizing, amplitude damping,
    /// phase damping.
    pub fn simulate(
        &self,
        circuit: &Circuit,
        noise: Option<&NoiseConfig>,
        focus_qubit: Option<usize>,
    ) -> Result<Vec<Snapshot>> {
        let start = Instant::now();
        let num_qubits = circuit.qubit_count();
        if num_qubits > self.config.max_qubits {
            return Err(SimulationError::TooManyQubits {
                requested: num_qubits,
                max: self.config.max_qubits,
            });
        }

        let compiled = compile_circuit(circuit)?;
        let focus = focus_qubit.filter(|&q| q < num_qubits).unwrap_or(0);
        let channels = noise_operators(noise);

        debug!(
            qubits = num_qubits,
            gates = compiled.len(),
            focus,
            noise = !channels.is_empty(),
            "simulating circuit"
        );

        let mut pure = PureState::new(num_qubits)?;
        if let Some(phase) = circuit.global_phase() {
            pure.apply_global_phase(phase);
        }
        let mut evolution = Evolution {
            rho: pure.to_density()?,
            pure: Some(pure),
        };

        let mut snapshots = Vec::with_capacity(compiled.len() + 1);
        let init = BTreeMap::from([("gate".to_string(), "INIT".to_string())]);
        snapshots.push(self.snapshot(0, &evolution, focus, circuit.global_phase(), init)?);

        for (index, gate) in compiled.into_iter().enumerate() {
            let step = index + 1;
            self.apply_gate(&mut evolution, &gate)?;

            for kraus in &channels {
                for qubit in 0..num_qubits {
                    evolution.rho.apply_channel(kraus, &[qubit])?;
                }
            }
            if !channels.is_empty() {
                evolution.pure = None;
            }

            if self.config.validate_state {
                self.validate(step, &evolution.rho)?;
            }

            trace!(
                step,
                gate = %gate.kind,
                reset = gate.resets(),
                pure = evolution.pure.is_some(),
                "applied step"
            );
            snapshots.push(self.snapshot(
                step,
                &evolution,
                focus,
                circuit.global_phase(),
                gate.metadata,
            )?);
        }

        debug!(
            steps = snapshots.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "simulation complete"
        );
        Ok(snapshots)
    }

    fn apply_gate(&self, evolution: &mut Evolution, gate: &CompiledGate) -> Result<()> {
        for action in &gate.actions {
            match action {
                Action::Unitary { operator, qubits } => {
                    evolution.rho.apply_operator(operator, qubits)?;
                    if let Some(pure) = evolution.pure.as_mut() {
                        pure.apply_operator(operator, qubits)?;
                    }
                }
                Action::Reset { qubit } => {
                    evolution.rho.apply_channel(&self.reset_ops, &[*qubit])?;
                    // Resetting the only qubit leaves a pure |0⟩; otherwise the
                    // result may be mixed
                    evolution.pure = if evolution.rho.num_qubits() == 1 {
                        Some(PureState::new(1)?)
                    } else {
                        None
                    };
                }
                Action::Annotation(_) => {}
            }
        }
        Ok(())
    }

    fn validate(&self, step: usize, rho: &DensityMatrix) -> Result<()> {
        if rho.is_valid(self.config.tolerance) {
            return Ok(());
        }
        Err(SimulationError::InvalidState {
            step,
            reason: format!(
                "trace = {:.12}, purity = {:.12}; expected a trace-1 Hermitian matrix",
                rho.trace(),
                rho.purity()
            ),
        })
    }

    fn snapshot(
        &self,
        step: usize,
        evolution: &Evolution,
        focus: usize,
        global_phase: Option<f64>,
        metadata: BTreeMap<String, String>,
    ) -> Result<Snapshot> {
        let reduced = reduce(&evolution.rho, focus)?;
        Ok(Snapshot {
            step,
            statevector: evolution.pure.as_ref().map(|p| p.amplitudes().to_vec()),
            density_matrix: evolution.rho.matrix().to_vec(),
            bloch: reduced.bloch,
            probabilities: reduced.probabilities,
            purity: reduced.purity,
            bloch_radius: reduced.radius,
            focus_qubit: reduced.focus_qubit,
            global_phase,
            metadata,
        })
    }
}

impl SnapshotSimulator for EvolutionEngine {
    fn simulate(
        &self,
        circuit: &Circuit,
        noise: Option<&NoiseConfig>,
        focus_qubit: Option<usize>,
    ) -> Result<Vec<Snapshot>> {
        EvolutionEngine::simulate(self, circuit, noise, focus_qubit)
    }
}

/// Kraus sets of the enabled channels, in application order
fn noise_operators(noise: Option<&NoiseConfig>) -> Vec<Vec<Operator>> {
    noise
        .filter(|config| config.enabled())
        .map(|config| {
            config
                .channels()
                .map(|channel| {
                    channel
                        .kraus_operators()
                        .iter()
                        .map(|k| Operator::single(k.matrix()))
                        .collect()
                })
                .collect()
        })
        .unwrap_or_default()
}
