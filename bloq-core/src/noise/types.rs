//! Per-request noise configuration

use super::channels::NoiseChannel;
use serde::{Deserialize, Serialize};

/// Optional channel strengths for one simulation request
///
/// Each strength is expected in `[0, 1]`; values outside are clamped when the
/// channel is built. The configuration is considered enabled when at least
/// one strength is present and positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    #[serde(default)]
    pub depolarizing: Option<f64>,
    #[serde(default)]
    pub amplitude_damping: Option<f64>,
    #[serde(default)]
    pub phase_damping: Option<f64>,
}

impl NoiseConfig {
    /// Create an empty (disabled) configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Depolarizing-only configuration
    pub fn depolarizing(p: f64) -> Self {
        Self::new().with_depolarizing(p)
    }

    pub fn with_depolarizing(mut self, p: f64) -> Self {
        self.depolarizing = Some(p);
        self
    }

    pub fn with_amplitude_damping(mut self, gamma: f64) -> Self {
        self.amplitude_damping = Some(gamma);
        self
    }

    pub fn with_phase_damping(mut self, lambda: f64) -> Self {
        self.phase_damping = Some(lambda);
        self
    }

    /// True iff any strength is present and positive
    pub fn enabled(&self) -> bool {
        [self.depolarizing, self.amplitude_damping, self.phase_damping]
            .iter()
            .any(|v| matches!(v, Some(p) if *p > 0.0))
    }

    /// Strengths in channel order with absent values defaulted to 0.0
    pub fn strengths(&self) -> [f64; 3] {
        [
            self.depolarizing.unwrap_or(0.0),
            self.amplitude_damping.unwrap_or(0.0),
            self.phase_damping.unwrap_or(0.0),
        ]
    }

    /// Configured channels with positive strength, in application order
    pub fn channels(&self) -> impl Iterator<Item = NoiseChannel> {
        let [depol, amp, phase] = self.strengths();
        [
            NoiseChannel::Depolarizing(depol),
            NoiseChannel::AmplitudeDamping(amp),
            NoiseChannel::PhaseDamping(phase),
        ]
        .into_iter()
        .filter(|channel| channel.strength() > 0.0)
    }
}
