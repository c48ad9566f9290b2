//! Port implementations

pub mod exporter;
pub mod memory_repository;

pub use exporter::StandardExporter;
pub use memory_repository::InMemoryCircuitRepository;
