//! In-memory circuit repository

use crate::ports::{CircuitRepository, CircuitSummary, StoredCircuit};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bloq_core::{Circuit, Snapshot};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Repository keeping copies of saved circuits for the process lifetime
#[derive(Debug, Default)]
pub struct InMemoryCircuitRepository {
    store: RwLock<Store>,
}

#[derive(Debug, Default)]
struct Store {
    entries: HashMap<String, StoredCircuit>,
    /// Ids in save order, for stable listing
    order: Vec<String>,
}

impl InMemoryCircuitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CircuitRepository for InMemoryCircuitRepository {
    async fn save(
        &self,
        circuit: &Circuit,
        snapshots: &[Snapshot],
        name: Option<&str>,
        focus_qubit: Option<usize>,
    ) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        let stored = StoredCircuit {
            circuit: circuit.clone(),
            snapshots: snapshots.to_vec(),
            name: name.map(str::to_string),
            focus_qubit,
        };

        let mut store = self.store.write().await;
        store.entries.insert(id.clone(), stored);
        store.order.push(id.clone());
        Ok(id)
    }

    async fn load(&self, id: &str) -> Result<StoredCircuit> {
        self.store
            .read()
            .await
            .entries
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("Circuit {} not found", id))
    }

    async fn list(&self) -> Result<Vec<CircuitSummary>> {
        let store = self.store.read().await;
        Ok(store
            .order
            .iter()
            .filter_map(|id| store.entries.get(id).map(|stored| (id, stored)))
            .map(|(id, stored)| CircuitSummary {
                id: id.clone(),
                name: stored.name.clone(),
                qubit_count: stored.circuit.qubit_count(),
                gate_count: stored.circuit.len(),
            })
            .collect())
    }
}
