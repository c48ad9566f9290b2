//! Collaborator ports used by the snapshot service
//!
//! Implementations report failures as opaque [`anyhow::Error`]s; the service
//! wraps them without inspecting them.

use anyhow::Result;
use async_trait::async_trait;
use bloq_core::{Circuit, Snapshot};
use serde::{Deserialize, Serialize};

/// A persisted circuit together with its snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCircuit {
    pub circuit: Circuit,
    pub snapshots: Vec<Snapshot>,
    pub name: Option<String>,
    pub focus_qubit: Option<usize>,
}

/// Listing entry for a persisted circuit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitSummary {
    pub id: String,
    pub name: Option<String>,
    pub qubit_count: usize,
    pub gate_count: usize,
}

/// Persistence boundary for saved circuits
#[async_trait]
pub trait CircuitRepository: Send + Sync {
    /// Store a circuit and its snapshots, returning a new id
    async fn save(
        &self,
        circuit: &Circuit,
        snapshots: &[Snapshot],
        name: Option<&str>,
        focus_qubit: Option<usize>,
    ) -> Result<String>;

    /// Fetch a stored circuit; unknown ids are an error
    async fn load(&self, id: &str) -> Result<StoredCircuit>;

    async fn list(&self) -> Result<Vec<CircuitSummary>>;
}

/// Serialization of circuits and snapshots
#[async_trait]
pub trait SnapshotExporter: Send + Sync {
    async fn export_qasm(&self, circuit: &Circuit) -> Result<String>;

    async fn export_json(&self, snapshots: &[Snapshot]) -> Result<String>;
}
