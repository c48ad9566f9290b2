//! Service configuration

use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// How `measure` accounts for noise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasurementNoise {
    /// Sample the final snapshot of the noisy evolution as-is
    #[default]
    Evolved,
    /// Sample the noise-free final Bloch vector after a per-channel vector attenuation
    Attenuated,
}

impl FromStr for MeasurementNoise {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "evolved" => Ok(MeasurementNoise::Evolved),
            "attenuated" => Ok(MeasurementNoise::Attenuated),
            other => Err(format!(
                "unknown measurement noise model '{}', expected 'evolved' or 'attenuated'",
                other
            )),
        }
    }
}

impl fmt::Display for MeasurementNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementNoise::Evolved => f.write_str("evolved"),
            MeasurementNoise::Attenuated => f.write_str("attenuated"),
        }
    }
}

/// Configuration for the snapshot service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Shots used when a measurement request names none
    pub default_shots: usize,

    /// Upper bound on shots per measurement
    pub max_shots: usize,

    /// Apply `default_noise` to requests that carry no noise configuration
    pub noise_enabled: bool,

    /// Depolarizing strength substituted when `noise_enabled` is set
    pub default_noise: f64,

    /// Noise model used by `measure`
    pub measurement_noise: MeasurementNoise,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_shots: 1024,
            max_shots: 4096,
            noise_enabled: false,
            default_noise: 0.01,
            measurement_noise: MeasurementNoise::Evolved,
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `BLOCH_*` environment variables on top of the defaults
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        override_with(&lookup, "BLOCH_DEFAULT_SHOTS", &mut config.default_shots);
        override_with(&lookup, "BLOCH_MAX_SHOTS", &mut config.max_shots);
        override_with(&lookup, "BLOCH_NOISE_ENABLED", &mut config.noise_enabled);
        override_with(&lookup, "BLOCH_DEFAULT_NOISE", &mut config.default_noise);
        override_with(
            &lookup,
            "BLOCH_MEASUREMENT_NOISE",
            &mut config.measurement_noise,
        );
        config
    }

    /// Builder: set shot defaults
    pub fn with_shots(mut self, default_shots: usize, max_shots: usize) -> Self {
        self.default_shots = default_shots;
        self.max_shots = max_shots;
        self
    }

    /// Builder: enable default noise with the given depolarizing strength
    pub fn with_default_noise(mut self, strength: f64) -> Self {
        self.noise_enabled = true;
        self.default_noise = strength;
        self
    }

    /// Builder: set the measurement noise model
    pub fn with_measurement_noise(mut self, model: MeasurementNoise) -> Self {
        self.measurement_noise = model;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_shots == 0 {
            return Err("max_shots must be > 0".to_string());
        }
        if self.default_shots > self.max_shots {
            return Err(format!(
                "default_shots ({}) exceeds max_shots ({})",
                self.default_shots, self.max_shots
            ));
        }
        if !(0.0..=1.0).contains(&self.default_noise) {
            return Err("default_noise must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }
}

fn override_with<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T)
where
    T: FromStr + fmt::Debug,
    T::Err: fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(err) => warn!(key, value = %raw, error = %err, default = ?slot, "ignoring invalid setting"),
    }
}
