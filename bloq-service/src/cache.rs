//! Snapshot cache keyed by request fingerprint
//!
//! Entries are never evicted: the key space is bounded by the distinct
//! (circuit, noise, focus) combinations a process sees.

use ahash::AHashMap;
use bloq_core::{Circuit, NoiseConfig, Snapshot};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Wrapper for f64 that implements Eq and Hash
///
/// Compares bit patterns; `-0.0` is folded into `0.0` on construction.
#[derive(Debug, Clone, Copy)]
pub struct OrderedFloat(pub f64);

impl OrderedFloat {
    pub fn new(value: f64) -> Self {
        // -0.0 == 0.0 but their bits differ
        Self(if value == 0.0 { 0.0 } else { value })
    }
}

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for OrderedFloat {}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Per-gate part of a fingerprint; metadata is left out
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GateFingerprint {
    name: String,
    targets: Vec<usize>,
    controls: Vec<usize>,
    parameters: Vec<OrderedFloat>,
}

/// Canonical, hashable encoding of one simulation request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    qubit_count: usize,
    global_phase: Option<OrderedFloat>,
    gates: Vec<GateFingerprint>,
    noise: Option<[OrderedFloat; 3]>,
    focus_qubit: Option<usize>,
}

impl CacheKey {
    /// Fingerprint `circuit` under `noise` and `focus_qubit`
    ///
    /// Absent channel strengths count as 0.0.
    pub fn new(circuit: &Circuit, noise: Option<&NoiseConfig>, focus_qubit: Option<usize>) -> Self {
        let gates = circuit
            .gates()
            .iter()
            .map(|gate| GateFingerprint {
                name: gate.name().to_string(),
                targets: gate.targets().to_vec(),
                controls: gate.controls().to_vec(),
                parameters: gate.parameters().iter().copied().map(OrderedFloat::new).collect(),
            })
            .collect();

        Self {
            qubit_count: circuit.qubit_count(),
            global_phase: circuit.global_phase().map(OrderedFloat::new),
            gates,
            noise: noise.map(|config| config.strengths().map(OrderedFloat::new)),
            focus_qubit,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
    /// `hits / (hits + misses)`, 1.0 before any lookup
    pub hit_rate: f64,
}

/// Process-wide store of simulation results
#[derive(Debug, Default)]
pub struct SnapshotCache {
    entries: RwLock<AHashMap<CacheKey, Arc<[Snapshot]>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key`, counting a hit or a miss
    pub fn get(&self, key: &CacheKey) -> Option<Arc<[Snapshot]>> {
        let result = self.entries.read().get(key).cloned();
        let counter = if result.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        result
    }

    /// Store `snapshots` under `key`; concurrent writers of one key store equal values
    pub fn insert(&self, key: CacheKey, snapshots: Arc<[Snapshot]>) {
        self.entries.write().insert(key, snapshots);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop all entries and reset counters
    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStats {
            entries: self.len(),
            hits,
            misses,
            hit_rate: if total == 0 {
                1.0
            } else {
                hits as f64 / total as f64
            },
        }
    }
}
