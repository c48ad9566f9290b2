//! Snapshot service for bloq
//!
//! [`SnapshotService`] sits between callers and the evolution engine. It
//! fingerprints each request (circuit, noise, focus qubit), runs the engine
//! at most once per fingerprint, and offers persistence, export and
//! measurement on top of the cached snapshots.
//!
//! Persistence and export are reached through the async [`ports`];
//! [`adapters`] holds an in-memory repository and an OpenQASM 3 / JSON
//! exporter.
//!
//! # Example
//!
//! ```
//! use bloq_core::{Circuit, Gate, MeasurementAxis};
//! use bloq_service::{InMemoryCircuitRepository, ServiceConfig, SnapshotService};
//! use bloq_sim::{EngineConfig, EvolutionEngine};
//! use std::sync::Arc;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let engine = EvolutionEngine::new(EngineConfig::default()).unwrap();
//! let service = SnapshotService::new(
//!     Arc::new(engine),
//!     Arc::new(InMemoryCircuitRepository::new()),
//!     ServiceConfig::default(),
//! );
//!
//! let circuit = Circuit::from_gates(1, [Gate::new("X", [0])]).unwrap();
//! let snapshots = service.generate(&circuit, None, None).await.unwrap();
//! assert_eq!(snapshots.len(), 2);
//!
//! let result = service
//!     .measure(&circuit, MeasurementAxis::Z, Some(32), None, None, Some(1))
//!     .await
//!     .unwrap();
//! assert_eq!(result.counts.minus, 32);
//! # });
//! ```

pub mod adapters;
pub mod cache;
pub mod config;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryCircuitRepository, StandardExporter};
pub use cache::{CacheKey, CacheStats, OrderedFloat, SnapshotCache};
pub use config::{MeasurementNoise, ServiceConfig};
pub use error::{Result, ServiceError};
pub use ports::{CircuitRepository, CircuitSummary, SnapshotExporter, StoredCircuit};
pub use service::{ExportBundle, SnapshotService, SnapshotSet};
