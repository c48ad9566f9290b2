//! Kraus channel evolution on density matrices

use approx::assert_relative_eq;
use bloq_core::{MeasurementAxis, NoiseChannel, NoiseConfig};
use bloq_gates::standard::rotation_x;
use bloq_gates::{controlled, matrices, Operator};
use bloq_state::{attenuate, reduce, sample, DensityMatrix};

fn kraus(channel: NoiseChannel) -> Vec<Operator> {
    channel
        .kraus_operators()
        .iter()
        .map(|k| Operator::single(k.matrix()))
        .collect()
}

/// |+i⟩ tilted towards |0⟩: Bloch (0, 0.6, 0.8)
fn tilted_state() -> DensityMatrix {
    let mut rho = DensityMatrix::new(1).unwrap();
    let rx = rotation_x(-(0.6f64).asin());
    rho.apply_operator(&Operator::single(&rx), &[0]).unwrap();
    rho
}

#[test]
fn tilted_state_fixture() {
    let bloch = reduce(&tilted_state(), 0).unwrap().bloch;
    assert_relative_eq!(bloch.x(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(bloch.y(), 0.6, epsilon = 1e-12);
    assert_relative_eq!(bloch.z(), 0.8, epsilon = 1e-12);
}

#[test]
fn depolarizing_shrinks_uniformly() {
    let p = 0.3;
    let mut rho = tilted_state();
    rho.apply_channel(&kraus(NoiseChannel::Depolarizing(p)), &[0])
        .unwrap();
    let bloch = reduce(&rho, 0).unwrap().bloch;
    assert_relative_eq!(bloch.y(), 0.6 * (1.0 - p), epsilon = 1e-12);
    assert_relative_eq!(bloch.z(), 0.8 * (1.0 - p), epsilon = 1e-12);
}

#[test]
fn amplitude_damping_pulls_towards_ground() {
    let gamma = 0.4;
    let mut rho = tilted_state();
    rho.apply_channel(&kraus(NoiseChannel::AmplitudeDamping(gamma)), &[0])
        .unwrap();
    let bloch = reduce(&rho, 0).unwrap().bloch;
    assert_relative_eq!(bloch.y(), 0.6 * (1.0 - gamma).sqrt(), epsilon = 1e-12);
    assert_relative_eq!(bloch.z(), 0.8 * (1.0 - gamma) + gamma, epsilon = 1e-12);
}

#[test]
fn phase_damping_only_touches_transverse_components() {
    let lambda = 0.5;
    let mut rho = tilted_state();
    rho.apply_channel(&kraus(NoiseChannel::PhaseDamping(lambda)), &[0])
        .unwrap();
    let bloch = reduce(&rho, 0).unwrap().bloch;
    assert_relative_eq!(bloch.y(), 0.6 * (1.0 - lambda), epsilon = 1e-12);
    assert_relative_eq!(bloch.z(), 0.8, epsilon = 1e-12);
}

#[test]
fn channels_preserve_trace_on_entangled_pairs() {
    let mut rho = DensityMatrix::new(2).unwrap();
    rho.apply_operator(&Operator::single(&matrices::HADAMARD), &[0])
        .unwrap();
    rho.apply_operator(&controlled(&matrices::PAULI_X, 1), &[1, 0])
        .unwrap();

    let noise = NoiseConfig::new()
        .with_depolarizing(0.2)
        .with_amplitude_damping(0.3)
        .with_phase_damping(0.1);
    for channel in noise.channels() {
        for qubit in 0..2 {
            rho.apply_channel(&kraus(channel), &[qubit]).unwrap();
        }
    }

    assert!(rho.is_valid(1e-10));
    assert!(rho.purity() < 1.0);
    let reduced = reduce(&rho, 1).unwrap();
    assert_relative_eq!(
        reduced.probabilities[0] + reduced.probabilities[1],
        1.0,
        epsilon = 1e-12
    );
}

#[test]
fn attenuation_is_coarser_than_channel_evolution() {
    let p = 0.2;
    let mut rho = tilted_state();
    rho.apply_channel(&kraus(NoiseChannel::Depolarizing(p)), &[0])
        .unwrap();
    let exact = reduce(&rho, 0).unwrap().bloch;

    let coarse = attenuate(
        &reduce(&tilted_state(), 0).unwrap().bloch,
        &NoiseConfig::depolarizing(p),
    );
    assert!(coarse.magnitude() < exact.magnitude());
}

#[test]
fn sampling_a_reduced_state() {
    let bloch = reduce(&tilted_state(), 0).unwrap().bloch;
    let result = sample(&bloch, MeasurementAxis::Y, 1000, Some(17));
    assert_relative_eq!(result.probabilities.plus, 0.8, epsilon = 1e-12);
    assert_eq!(result.counts.total(), 1000);
    // 800 expected, binomial std ≈ 12.6
    assert!((700..=900).contains(&result.counts.plus));
    assert_eq!(result.overlay_vector, [0.0, 1.0, 0.0]);
}
