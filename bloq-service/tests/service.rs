//! Snapshot service behaviour against the real engine

use anyhow::anyhow;
use approx::assert_relative_eq;
use async_trait::async_trait;
use bloq_core::{Circuit, Gate, MeasurementAxis, NoiseConfig, Outcome, Snapshot};
use bloq_service::{
    CircuitRepository, CircuitSummary, InMemoryCircuitRepository, MeasurementNoise,
    ServiceConfig, ServiceError, SnapshotService, StandardExporter, StoredCircuit,
};
use bloq_sim::{EngineConfig, EvolutionEngine, SimulationError, SnapshotSimulator};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Engine wrapper counting how often it actually runs
struct CountingSimulator {
    engine: EvolutionEngine,
    runs: AtomicUsize,
}

impl CountingSimulator {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            engine: EvolutionEngine::new(EngineConfig::reliable()).unwrap(),
            runs: AtomicUsize::new(0),
        })
    }

    fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl SnapshotSimulator for CountingSimulator {
    fn simulate(
        &self,
        circuit: &Circuit,
        noise: Option<&NoiseConfig>,
        focus_qubit: Option<usize>,
    ) -> bloq_sim::Result<Vec<Snapshot>> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        self.engine.simulate(circuit, noise, focus_qubit)
    }
}

/// Repository that always fails
struct BrokenRepository;

#[async_trait]
impl CircuitRepository for BrokenRepository {
    async fn save(
        &self,
        _circuit: &Circuit,
        _snapshots: &[Snapshot],
        _name: Option<&str>,
        _focus_qubit: Option<usize>,
    ) -> anyhow::Result<String> {
        Err(anyhow!("disk full"))
    }

    async fn load(&self, id: &str) -> anyhow::Result<StoredCircuit> {
        Err(anyhow!("cannot read {}", id))
    }

    async fn list(&self) -> anyhow::Result<Vec<CircuitSummary>> {
        Err(anyhow!("offline"))
    }
}

fn service_with(config: ServiceConfig) -> (SnapshotService, Arc<CountingSimulator>) {
    let simulator = CountingSimulator::new();
    let service = SnapshotService::new(
        simulator.clone(),
        Arc::new(InMemoryCircuitRepository::new()),
        config,
    )
    .with_exporter(Arc::new(StandardExporter::new()));
    (service, simulator)
}

fn service() -> (SnapshotService, Arc<CountingSimulator>) {
    service_with(ServiceConfig::default())
}

fn bell() -> Circuit {
    Circuit::from_gates(
        2,
        [Gate::new("H", [0]), Gate::new("CX", [1]).with_controls([0])],
    )
    .unwrap()
}

#[tokio::test]
async fn identical_requests_simulate_once() {
    let (service, simulator) = service();
    assert_eq!(service.cache_stats().hit_rate, 1.0);

    let first = service.generate(&bell(), None, Some(0)).await.unwrap();
    let second = service.generate(&bell(), None, Some(0)).await.unwrap();

    assert_eq!(simulator.runs(), 1);
    assert_eq!(&*first, &*second);

    let stats = service.cache_stats();
    assert_eq!(stats.misses, 1);
    assert!(stats.hits >= 1);
    assert_eq!(stats.entries, 1);
}

#[tokio::test]
async fn focus_change_is_a_miss() {
    let (service, simulator) = service();
    service.generate(&bell(), None, Some(0)).await.unwrap();
    service.generate(&bell(), None, Some(1)).await.unwrap();

    assert_eq!(simulator.runs(), 2);
    assert_eq!(service.cache_stats().misses, 2);
}

#[tokio::test]
async fn metadata_does_not_affect_fingerprint() {
    let (service, simulator) = service();
    let tagged = Circuit::from_gates(
        2,
        [
            Gate::new("H", [0]).with_metadata("color", "red"),
            Gate::new("CX", [1]).with_controls([0]),
        ],
    )
    .unwrap();

    service.generate(&bell(), None, None).await.unwrap();
    service.generate(&tagged, None, None).await.unwrap();
    assert_eq!(simulator.runs(), 1);
}

#[tokio::test]
async fn regenerate_returns_suffix_from_cache() {
    let (service, simulator) = service();
    let all = service.generate(&bell(), None, None).await.unwrap();

    let tail = service
        .regenerate_from(&bell(), 1, None, None)
        .await
        .unwrap();
    assert_eq!(simulator.runs(), 1);
    assert_eq!(tail.len(), 2);
    assert_eq!(tail.start(), 1);
    assert_eq!(tail[0].step, 1);
    assert_eq!(&tail[..], &all[1..]);

    let beyond = service
        .regenerate_from(&bell(), 10, None, None)
        .await
        .unwrap();
    assert!(beyond.is_empty());
    assert_eq!(beyond.all().len(), 3);
}

#[tokio::test]
async fn engine_errors_surface_unchanged() {
    let (service, _) = service();
    let bad = Circuit::from_gates(2, [Gate::new("CX", [0]).with_controls([0])]).unwrap();
    let err = service.generate(&bad, None, None).await.unwrap_err();
    assert!(matches!(err, ServiceError::Simulation(SimulationError::Circuit(_))));
    assert!(err.to_string().contains("CX"));
    assert_eq!(service.cache_stats().entries, 0);
}

#[tokio::test]
async fn save_seeds_cache_and_round_trips() {
    let (service, simulator) = service();
    let engine = EvolutionEngine::new(EngineConfig::default()).unwrap();
    let snapshots = engine.simulate(&bell(), None, Some(1)).unwrap();

    let id = service
        .save(&bell(), &snapshots, Some("bell"), Some(1))
        .await
        .unwrap();

    let cached = service.generate(&bell(), None, Some(1)).await.unwrap();
    assert_eq!(simulator.runs(), 0);
    assert_eq!(service.cache_stats().hits, 1);
    assert_eq!(&*cached, snapshots.as_slice());

    let stored = service.load(&id).await.unwrap();
    assert_eq!(stored.circuit, bell());
    assert_eq!(stored.snapshots, snapshots);
    assert_eq!(stored.name.as_deref(), Some("bell"));
    assert_eq!(stored.focus_qubit, Some(1));

    let listed = service.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
}

#[tokio::test]
async fn repository_failures_are_wrapped() {
    let service = SnapshotService::new(
        CountingSimulator::new(),
        Arc::new(BrokenRepository),
        ServiceConfig::default(),
    );
    assert!(matches!(
        service.load("x").await,
        Err(ServiceError::Repository(_))
    ));
    assert!(matches!(service.list().await, Err(ServiceError::Repository(_))));
    let err = service.save(&bell(), &[], None, None).await.unwrap_err();
    assert!(err.to_string().contains("disk full"));
}

#[tokio::test]
async fn failed_save_leaves_cache_untouched() {
    let simulator = CountingSimulator::new();
    let service = SnapshotService::new(
        simulator.clone(),
        Arc::new(BrokenRepository),
        ServiceConfig::default(),
    );
    let snapshots = EvolutionEngine::new(EngineConfig::reliable())
        .unwrap()
        .simulate(&bell(), None, Some(1))
        .unwrap();

    let err = service
        .save(&bell(), &snapshots, Some("bell"), Some(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repository(_)));
    assert_eq!(service.cache_stats().entries, 0);

    service.generate(&bell(), None, Some(1)).await.unwrap();
    assert_eq!(simulator.runs(), 1);
}

#[tokio::test]
async fn export_requires_exporter() {
    let simulator = CountingSimulator::new();
    let service = SnapshotService::new(
        simulator.clone(),
        Arc::new(InMemoryCircuitRepository::new()),
        ServiceConfig::default(),
    );
    let err = service
        .export(&bell(), None, None, false, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ExportUnavailable));
    assert_eq!(simulator.runs(), 0);
}

#[tokio::test]
async fn export_with_share_saves_circuit() {
    let (service, simulator) = service();
    let bundle = service
        .export(&bell(), None, Some(0), true, Some("shared"))
        .await
        .unwrap();

    assert!(bundle.qasm.contains("cx q[0], q[1];"));
    assert!(bundle.snapshot_json.contains("\"density_matrix\""));
    assert_eq!(bundle.snapshots.len(), 3);

    let id = bundle.share_id.unwrap();
    let stored = service.load(&id).await.unwrap();
    assert_eq!(stored.name.as_deref(), Some("shared"));
    assert_eq!(stored.snapshots.len(), 3);
    assert_eq!(simulator.runs(), 1);

    let plain = service
        .export(&bell(), None, Some(0), false, None)
        .await
        .unwrap();
    assert!(plain.share_id.is_none());
    assert_eq!(service.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn measure_uses_final_snapshot() {
    let (service, _) = service();
    let circuit = Circuit::from_gates(1, [Gate::new("H", [0])]).unwrap();

    let result = service
        .measure(&circuit, MeasurementAxis::X, Some(50), None, None, Some(9))
        .await
        .unwrap();
    assert_eq!(result.step, 1);
    assert_eq!(result.axis, MeasurementAxis::X);
    assert_eq!(result.counts.plus, 50);
    assert_eq!(result.longest_symbol, Some(Outcome::Plus));
    assert_eq!(result.overlay_vector, [1.0, 0.0, 0.0]);

    let seeded_a = service
        .measure(&circuit, MeasurementAxis::Z, Some(200), None, None, Some(4))
        .await
        .unwrap();
    let seeded_b = service
        .measure(&circuit, MeasurementAxis::Z, Some(200), None, None, Some(4))
        .await
        .unwrap();
    assert_eq!(seeded_a.samples, seeded_b.samples);
    assert_relative_eq!(seeded_a.probabilities.plus, 0.5, epsilon = 1e-9);
}

#[tokio::test]
async fn measure_enforces_shot_limits() {
    let (service, simulator) = service_with(ServiceConfig::new().with_shots(16, 64));
    let circuit = Circuit::new(1).unwrap();

    let err = service
        .measure(&circuit, MeasurementAxis::Z, Some(65), None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::ShotLimitExceeded { requested: 65, max: 64 }
    ));
    assert_eq!(simulator.runs(), 0);

    let result = service
        .measure(&circuit, MeasurementAxis::Z, None, None, None, Some(0))
        .await
        .unwrap();
    assert_eq!(result.shots, 16);
    assert_eq!(result.samples.len(), 16);
}

#[tokio::test]
async fn evolved_measurement_samples_noisy_state() {
    let (service, _) = service();
    let circuit = Circuit::from_gates(1, [Gate::new("X", [0])]).unwrap();
    let noise = NoiseConfig::depolarizing(0.2);

    let result = service
        .measure(&circuit, MeasurementAxis::Z, Some(10), Some(&noise), None, Some(2))
        .await
        .unwrap();
    // exact channel: z = -(1 - p)
    assert_relative_eq!(result.probabilities.plus, 0.1, epsilon = 1e-9);
}

#[tokio::test]
async fn attenuated_measurement_uses_noise_free_state() {
    let config = ServiceConfig::new().with_measurement_noise(MeasurementNoise::Attenuated);
    let (service, simulator) = service_with(config);
    let circuit = Circuit::from_gates(1, [Gate::new("X", [0])]).unwrap();
    let noise = NoiseConfig::depolarizing(0.2);

    let result = service
        .measure(&circuit, MeasurementAxis::Z, Some(10), Some(&noise), None, Some(2))
        .await
        .unwrap();
    // vector approximation: z = -1 * (1 - 2p)
    assert_relative_eq!(result.probabilities.plus, 0.2, epsilon = 1e-9);

    // the noise-free evolution is the one cached
    service.generate(&circuit, None, None).await.unwrap();
    assert_eq!(simulator.runs(), 1);
}

#[tokio::test]
async fn default_noise_applies_when_enabled() {
    let (service, simulator) = service_with(ServiceConfig::new().with_default_noise(0.1));
    let circuit = Circuit::from_gates(1, [Gate::new("X", [0])]).unwrap();

    let implicit = service.generate(&circuit, None, None).await.unwrap();
    assert!(!implicit[1].is_pure_track());
    assert_relative_eq!(implicit[1].bloch.z(), -0.9, epsilon = 1e-9);

    let explicit = NoiseConfig::depolarizing(0.1);
    service
        .generate(&circuit, Some(&explicit), None)
        .await
        .unwrap();
    assert_eq!(simulator.runs(), 1);
}

#[tokio::test]
async fn save_seeds_the_default_noise_fingerprint_when_enabled() {
    let (service, simulator) = service_with(ServiceConfig::new().with_default_noise(0.1));
    let circuit = Circuit::from_gates(1, [Gate::new("H", [0])]).unwrap();
    let noisy = EvolutionEngine::new(EngineConfig::reliable())
        .unwrap()
        .simulate(&circuit, Some(&NoiseConfig::depolarizing(0.1)), None)
        .unwrap();

    service.save(&circuit, &noisy, None, None).await.unwrap();
    let snapshots = service.generate(&circuit, None, None).await.unwrap();

    assert_eq!(simulator.runs(), 0);
    assert_eq!(&*snapshots, noisy.as_slice());
}
