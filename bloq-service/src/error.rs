//! Error types for the snapshot service

use bloq_sim::SimulationError;
use thiserror::Error;

/// Result type for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors surfaced by [`SnapshotService`](crate::SnapshotService)
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Engine error, passed through unchanged
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Export requested but no exporter is configured
    #[error("Export functionality not configured")]
    ExportUnavailable,

    /// Measurement asked for more shots than allowed
    #[error("Requested {requested} shots, limit is {max}")]
    ShotLimitExceeded { requested: usize, max: usize },

    /// Repository collaborator failed
    #[error("Repository error: {0}")]
    Repository(#[source] anyhow::Error),

    /// Exporter collaborator failed
    #[error("Export error: {0}")]
    Export(#[source] anyhow::Error),
}

impl From<bloq_core::QuantumError> for ServiceError {
    fn from(err: bloq_core::QuantumError) -> Self {
        ServiceError::Simulation(err.into())
    }
}
