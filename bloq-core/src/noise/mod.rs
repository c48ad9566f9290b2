//! Noise configuration and single-qubit noise channels
//!
//! Three channels are supported, applied per qubit after every gate in the
//! fixed order depolarizing → amplitude damping → phase damping:
//!
//! - **Depolarizing**: random Pauli errors
//! - **Amplitude damping**: energy relaxation towards |0⟩ (T1)
//! - **Phase damping**: loss of coherence without energy loss (T2)
//!
//! # Usage
//!
//! ```
//! use bloq_core::noise::{NoiseChannel, NoiseConfig};
//!
//! let noise = NoiseConfig::new().with_depolarizing(0.05).with_phase_damping(0.1);
//! assert!(noise.enabled());
//!
//! let channels: Vec<_> = noise.channels().collect();
//! assert_eq!(channels[0], NoiseChannel::Depolarizing(0.05));
//! assert_eq!(channels[1], NoiseChannel::PhaseDamping(0.1));
//! ```

pub mod channels;
pub mod types;

pub use channels::{completeness_defect, KrausOperator, NoiseChannel};
pub use types::NoiseConfig;
