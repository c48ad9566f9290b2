//! Evolution engine configuration

/// Configuration for the evolution engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Largest circuit the engine accepts
    pub max_qubits: usize,

    /// Check trace and hermiticity of the density matrix after each step
    pub validate_state: bool,

    /// Tolerance used by state validation
    pub tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_qubits: 8,
            validate_state: cfg!(debug_assertions),
            tolerance: 1e-9,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// No per-step validation
    pub fn performance() -> Self {
        Self {
            validate_state: false,
            ..Default::default()
        }
    }

    /// Validate after every step
    pub fn reliable() -> Self {
        Self {
            validate_state: true,
            ..Default::default()
        }
    }

    /// Builder: set the qubit limit
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Builder: enable/disable validation
    pub fn with_validation(mut self, enable: bool) -> Self {
        self.validate_state = enable;
        self
    }

    /// Builder: set validation tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_qubits == 0 {
            return Err("max_qubits must be > 0".to_string());
        }

        // 4^n complex entries per density matrix
        if self.max_qubits > 12 {
            return Err("max_qubits too large for density-matrix evolution (max: 12)".to_string());
        }

        if !(self.tolerance > 0.0 && self.tolerance < 1.0) {
            return Err("tolerance must be between 0.0 and 1.0 (exclusive)".to_string());
        }

        Ok(())
    }
}
