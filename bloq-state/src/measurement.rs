//! Projective sampling of a single-qubit Bloch vector
//!
//! Outcomes are drawn i.i.d. from `{plus, minus}` with
//! `p_plus = (1 + b·axis) / 2`. Passing a seed makes the sample sequence
//! reproducible.

use bloq_core::{
    BlochVector, MeasurementAxis, MeasurementResult, NoiseConfig, Outcome, OutcomeCounts,
    OutcomeProbabilities,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Longest run and switch count of an outcome sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    pub longest_run: usize,
    /// First symbol to reach `longest_run`; `None` for an empty sequence
    pub longest_symbol: Option<Outcome>,
    pub switches: usize,
}

/// `(p_plus, p_minus)` for measuring `bloch` along `axis`
pub fn axis_probabilities(bloch: &BlochVector, axis: MeasurementAxis) -> OutcomeProbabilities {
    let dot = bloch.dot(axis.unit_vector()).clamp(-1.0, 1.0);
    let plus = (1.0 + dot) / 2.0;
    OutcomeProbabilities {
        plus,
        minus: 1.0 - plus,
    }
}

/// Draw `shots` outcomes, seeded when `seed` is given
///
/// # Example
///
/// ```
/// use bloq_core::{BlochVector, MeasurementAxis, Outcome};
/// use bloq_state::sample;
///
/// let result = sample(&BlochVector::north(), MeasurementAxis::Z, 16, Some(7));
/// assert_eq!(result.counts.plus, 16);
/// assert!(result.samples.iter().all(|s| *s == Outcome::Plus));
/// ```
pub fn sample(
    bloch: &BlochVector,
    axis: MeasurementAxis,
    shots: usize,
    seed: Option<u64>,
) -> MeasurementResult {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    sample_with_rng(bloch, axis, shots, &mut rng)
}

/// Draw `shots` outcomes from a caller-supplied random source
pub fn sample_with_rng<R: Rng + ?Sized>(
    bloch: &BlochVector,
    axis: MeasurementAxis,
    shots: usize,
    rng: &mut R,
) -> MeasurementResult {
    let probabilities = axis_probabilities(bloch, axis);

    let samples: Vec<Outcome> = (0..shots)
        .map(|_| {
            if rng.gen::<f64>() < probabilities.plus {
                Outcome::Plus
            } else {
                Outcome::Minus
            }
        })
        .collect();

    let plus = samples.iter().filter(|s| **s == Outcome::Plus).count();
    let counts = OutcomeCounts {
        plus,
        minus: shots - plus,
    };

    let (mean, standard_deviation) = moments(&samples);
    let runs = analyze_runs(&samples);

    let sign = counts.majority().value();
    let overlay_vector = axis.unit_vector().map(|c| c * sign);

    MeasurementResult {
        step: 0,
        axis,
        shots,
        counts,
        probabilities,
        overlay_vector,
        samples,
        mean,
        standard_deviation,
        longest_run: runs.longest_run,
        longest_symbol: runs.longest_symbol,
        switches: runs.switches,
    }
}

/// Mean and population standard deviation of the ±1 encoding
fn moments(samples: &[Outcome]) -> (f64, f64) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let n = samples.len() as f64;
    let mean = samples.iter().map(Outcome::value).sum::<f64>() / n;
    let variance = samples
        .iter()
        .map(|s| (s.value() - mean).powi(2))
        .sum::<f64>()
        / n;
    (mean, variance.sqrt())
}

/// Single pass over `samples` for the longest run and the switch count
///
/// Ties keep the run seen first.
pub fn analyze_runs(samples: &[Outcome]) -> RunStats {
    let Some((&first, rest)) = samples.split_first() else {
        return RunStats::default();
    };

    let mut stats = RunStats {
        longest_run: 1,
        longest_symbol: Some(first),
        switches: 0,
    };
    let mut current = first;
    let mut run = 1;

    for &outcome in rest {
        if outcome == current {
            run += 1;
        } else {
            stats.switches += 1;
            current = outcome;
            run = 1;
        }
        if run > stats.longest_run {
            stats.longest_run = run;
            stats.longest_symbol = Some(current);
        }
    }

    stats
}

/// Approximate channel attenuation applied directly to a Bloch vector
///
/// Depolarizing scales every component by `max(0, 1 − 2p)`, phase damping
/// scales x and y by `max(0, 1 − λ)`, amplitude damping maps
/// `z → z(1 − γ) + γ`. Coarser than evolving the density matrix.
pub fn attenuate(bloch: &BlochVector, noise: &NoiseConfig) -> BlochVector {
    let [x, y, z] = bloch.to_array();
    let [p, gamma, lambda] = noise.strengths();

    let depol = (1.0 - 2.0 * p).max(0.0);
    let (mut x, mut y, mut z) = (x * depol, y * depol, z * depol);

    let dephase = (1.0 - lambda).max(0.0);
    x *= dephase;
    y *= dephase;

    if gamma > 0.0 {
        z = z * (1.0 - gamma) + gamma;
    }

    BlochVector::new(x, y, z)
}
