//! Snapshot service: cached generation, persistence, export and measurement

use crate::cache::{CacheKey, CacheStats, SnapshotCache};
use crate::config::{MeasurementNoise, ServiceConfig};
use crate::error::{Result, ServiceError};
use crate::ports::{CircuitRepository, CircuitSummary, SnapshotExporter, StoredCircuit};
use bloq_core::{BlochVector, Circuit, MeasurementAxis, MeasurementResult, NoiseConfig, Snapshot};
use bloq_sim::SnapshotSimulator;
use bloq_state::{attenuate, sample};
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared view of cached snapshots, starting at some step
///
/// Dereferences to the visible slice.
#[derive(Debug, Clone)]
pub struct SnapshotSet {
    snapshots: Arc<[Snapshot]>,
    start: usize,
}

impl SnapshotSet {
    fn new(snapshots: Arc<[Snapshot]>, start: usize) -> Self {
        let start = start.min(snapshots.len());
        Self { snapshots, start }
    }

    /// Step of the first visible snapshot
    pub fn start(&self) -> usize {
        self.start
    }

    /// Every snapshot of the simulation, ignoring `start`
    pub fn all(&self) -> &[Snapshot] {
        &self.snapshots
    }
}

impl Deref for SnapshotSet {
    type Target = [Snapshot];

    fn deref(&self) -> &[Snapshot] {
        &self.snapshots[self.start..]
    }
}

/// Output of [`SnapshotService::export`]
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub qasm: String,
    pub snapshot_json: String,
    /// Repository id when the export was shared
    pub share_id: Option<String>,
    pub snapshots: SnapshotSet,
}

/// Coordinates simulation, caching and the repository/export collaborators
pub struct SnapshotService {
    simulator: Arc<dyn SnapshotSimulator>,
    repository: Arc<dyn CircuitRepository>,
    exporter: Option<Arc<dyn SnapshotExporter>>,
    cache: SnapshotCache,
    config: ServiceConfig,
}

impl SnapshotService {
    pub fn new(
        simulator: Arc<dyn SnapshotSimulator>,
        repository: Arc<dyn CircuitRepository>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            simulator,
            repository,
            exporter: None,
            cache: SnapshotCache::new(),
            config,
        }
    }

    /// Builder: attach an exporter
    pub fn with_exporter(mut self, exporter: Arc<dyn SnapshotExporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// All snapshots for `circuit`, simulating only on a cache miss
    pub async fn generate(
        &self,
        circuit: &Circuit,
        noise: Option<&NoiseConfig>,
        focus_qubit: Option<usize>,
    ) -> Result<SnapshotSet> {
        let noise = self.effective_noise(noise);
        let snapshots = self.fetch(circuit, noise.as_ref(), focus_qubit)?;
        Ok(SnapshotSet::new(snapshots, 0))
    }

    /// Snapshots from `start_step` onwards; empty past the last step
    pub async fn regenerate_from(
        &self,
        circuit: &Circuit,
        start_step: usize,
        noise: Option<&NoiseConfig>,
        focus_qubit: Option<usize>,
    ) -> Result<SnapshotSet> {
        let noise = self.effective_noise(noise);
        let snapshots = self.fetch(circuit, noise.as_ref(), focus_qubit)?;
        Ok(SnapshotSet::new(snapshots, start_step))
    }

    /// Persist `circuit` with its snapshots and seed the cache with them
    ///
    /// The snapshots are taken to be the noise-free result for `focus_qubit`,
    /// so an immediately following `generate` with the same arguments hits.
    pub async fn save(
        &self,
        circuit: &Circuit,
        snapshots: &[Snapshot],
        name: Option<&str>,
        focus_qubit: Option<usize>,
    ) -> Result<String> {
        let noise = self.effective_noise(None);
        self.persist(circuit, snapshots, name, noise.as_ref(), focus_qubit)
            .await
    }

    pub async fn load(&self, id: &str) -> Result<StoredCircuit> {
        self.repository
            .load(id)
            .await
            .map_err(ServiceError::Repository)
    }

    pub async fn list(&self) -> Result<Vec<CircuitSummary>> {
        self.repository.list().await.map_err(ServiceError::Repository)
    }

    /// QASM and JSON for `circuit`, optionally saving it for sharing
    pub async fn export(
        &self,
        circuit: &Circuit,
        noise: Option<&NoiseConfig>,
        focus_qubit: Option<usize>,
        share: bool,
        name: Option<&str>,
    ) -> Result<ExportBundle> {
        let exporter = self
            .exporter
            .as_ref()
            .ok_or(ServiceError::ExportUnavailable)?;

        let noise = self.effective_noise(noise);
        let snapshots = SnapshotSet::new(self.fetch(circuit, noise.as_ref(), focus_qubit)?, 0);

        let qasm = exporter
            .export_qasm(circuit)
            .await
            .map_err(ServiceError::Export)?;
        let snapshot_json = exporter
            .export_json(&snapshots)
            .await
            .map_err(ServiceError::Export)?;

        let share_id = if share {
            Some(
                self.persist(circuit, &snapshots, name, noise.as_ref(), focus_qubit)
                    .await?,
            )
        } else {
            None
        };

        Ok(ExportBundle {
            qasm,
            snapshot_json,
            share_id,
            snapshots,
        })
    }

    /// Sample `shots` outcomes along `axis` from the final snapshot
    ///
    /// `shots` defaults to the configured `default_shots` and may not exceed
    /// `max_shots`.
    pub async fn measure(
        &self,
        circuit: &Circuit,
        axis: MeasurementAxis,
        shots: Option<usize>,
        noise: Option<&NoiseConfig>,
        focus_qubit: Option<usize>,
        seed: Option<u64>,
    ) -> Result<MeasurementResult> {
        let shots = shots.unwrap_or(self.config.default_shots);
        if shots > self.config.max_shots {
            warn!(
                requested = shots,
                max = self.config.max_shots,
                "rejecting measurement"
            );
            return Err(ServiceError::ShotLimitExceeded {
                requested: shots,
                max: self.config.max_shots,
            });
        }

        let noise = self.effective_noise(noise);
        let (step, bloch) = match self.config.measurement_noise {
            MeasurementNoise::Evolved => {
                final_bloch(&self.fetch(circuit, noise.as_ref(), focus_qubit)?)
            }
            MeasurementNoise::Attenuated => {
                let (step, bloch) = final_bloch(&self.fetch(circuit, None, focus_qubit)?);
                match noise.filter(NoiseConfig::enabled) {
                    Some(config) => (step, attenuate(&bloch, &config)),
                    None => (step, bloch),
                }
            }
        };

        Ok(sample(&bloch, axis, shots, seed).at_step(step))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Substitute the configured default noise for requests without any
    fn effective_noise(&self, noise: Option<&NoiseConfig>) -> Option<NoiseConfig> {
        match noise {
            Some(config) => Some(*config),
            None if self.config.noise_enabled => {
                Some(NoiseConfig::depolarizing(self.config.default_noise))
            }
            None => None,
        }
    }

    fn fetch(
        &self,
        circuit: &Circuit,
        noise: Option<&NoiseConfig>,
        focus_qubit: Option<usize>,
    ) -> Result<Arc<[Snapshot]>> {
        let key = CacheKey::new(circuit, noise, focus_qubit);
        if let Some(cached) = self.cache.get(&key) {
            debug!(steps = cached.len(), focus_qubit, "snapshot cache hit");
            return Ok(cached);
        }

        debug!(
            qubits = circuit.qubit_count(),
            gates = circuit.len(),
            focus_qubit,
            "snapshot cache miss"
        );
        let snapshots: Arc<[Snapshot]> = self
            .simulator
            .simulate(circuit, noise, focus_qubit)?
            .into();
        self.cache.insert(key, Arc::clone(&snapshots));
        Ok(snapshots)
    }

    async fn persist(
        &self,
        circuit: &Circuit,
        snapshots: &[Snapshot],
        name: Option<&str>,
        noise: Option<&NoiseConfig>,
        focus_qubit: Option<usize>,
    ) -> Result<String> {
        let id = self
            .repository
            .save(circuit, snapshots, name, focus_qubit)
            .await
            .map_err(ServiceError::Repository)?;
        info!(%id, name, qubits = circuit.qubit_count(), "saved circuit");

        if snapshots.len() == circuit.len() + 1 {
            self.cache.insert(
                CacheKey::new(circuit, noise, focus_qubit),
                Arc::from(snapshots),
            );
        } else {
            warn!(
                snapshots = snapshots.len(),
                gates = circuit.len(),
                "snapshot count does not match circuit, not caching"
            );
        }
        Ok(id)
    }
}

fn final_bloch(snapshots: &[Snapshot]) -> (usize, BlochVector) {
    snapshots
        .last()
        .map(|snapshot| (snapshot.step, snapshot.bloch))
        .unwrap_or((0, BlochVector::north()))
}
