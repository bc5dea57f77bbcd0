//! Cross-component end-to-end scenarios exercising the public API the way a
//! caller assembling a circuit, a noise model, or a QEC experiment would.

use omniq_core::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// S1 — Bell state: H(0); CNOT(0,1).
#[test]
fn bell_state_has_equal_weight_on_00_and_11() {
    let mut circuit = Circuit::new(2, 0);
    circuit.h(0).unwrap();
    circuit.cnot(0, 1).unwrap();
    let mut state = StateVector::zero(2);
    circuit.execute_all(&mut state).unwrap();

    let h = std::f64::consts::FRAC_1_SQRT_2;
    let amps = state.amplitudes();
    assert!(close(amps[0].re, h) && amps[0].im.abs() < 1e-9);
    assert!(amps[1].norm() < 1e-9);
    assert!(amps[2].norm() < 1e-9);
    assert!(close(amps[3].re, h) && amps[3].im.abs() < 1e-9);

    assert!(close(state.probability(0, false).unwrap(), 0.5));
    assert!(close(state.expectation(0, Pauli::Z).unwrap(), 0.0));

    let rho = DensityMatrix::from_pure(&state);
    assert!(close(omniq_core::density_matrix::purity(&rho).unwrap(), 1.0));
    assert!(close(omniq_core::density_matrix::entropy(&rho).unwrap(), 0.0));
}

/// S2 — GHZ state: H(0); CNOT(0,1); CNOT(1,2).
#[test]
fn ghz_state_partial_trace_gives_maximally_mixed_two_qubit_block() {
    let mut circuit = Circuit::new(3, 0);
    circuit.h(0).unwrap();
    circuit.cnot(0, 1).unwrap();
    circuit.cnot(1, 2).unwrap();
    let mut state = StateVector::zero(3);
    circuit.execute_all(&mut state).unwrap();

    let h = std::f64::consts::FRAC_1_SQRT_2;
    let amps = state.amplitudes();
    assert!(close(amps[0].re, h));
    assert!(close(amps[7].re, h));
    for i in 1..7 {
        assert!(amps[i].norm() < 1e-9);
    }

    let reduced = state.partial_trace(2).unwrap();
    assert!(close(omniq_core::density_matrix::entropy(&reduced).unwrap(), 1.0));
    assert!(close(reduced.matrix()[[0, 0]].re, 0.5));
    assert!(close(reduced.matrix()[[3, 3]].re, 0.5));
}

/// S3 — Phase-damping composition on a plus state.
#[test]
fn full_phase_damping_kills_off_diagonal_coherence() {
    let mut state = StateVector::zero(1);
    state.h(0).unwrap();
    let mut rho = DensityMatrix::from_pure(&state);

    let channel = omniq_core::noise::channels::PhaseDampingChannel::new(1.0).unwrap();
    rho.apply_channel(&channel, 0).unwrap();

    assert!(close(rho.matrix()[[0, 0]].re, 0.5));
    assert!(close(rho.matrix()[[1, 1]].re, 0.5));
    assert!(rho.matrix()[[0, 1]].norm() < 1e-9);
    assert!(rho.matrix()[[1, 0]].norm() < 1e-9);
    assert!(close(omniq_core::density_matrix::purity(&rho).unwrap(), 0.5));
}

/// S4 — Clifford Bell state via the stabilizer tableau, seeded identically
/// across two fresh simulators.
#[test]
fn clifford_bell_state_measurement_outcomes_are_correlated() {
    let mut sim_a = CliffordSim::new(2);
    sim_a.h(0).unwrap();
    sim_a.cnot(0, 1).unwrap();
    let mut rng_a = StdRng::seed_from_u64(123);
    let first = sim_a.measure(0, &mut rng_a).unwrap();
    let second = sim_a.measure(1, &mut rng_a).unwrap();
    assert_eq!(first.outcome, second.outcome);

    let mut sim_b = CliffordSim::new(2);
    sim_b.h(0).unwrap();
    sim_b.cnot(0, 1).unwrap();
    let mut rng_b = StdRng::seed_from_u64(123);
    let first_b = sim_b.measure(0, &mut rng_b).unwrap();
    assert_eq!(first_b.outcome, first.outcome);
}

/// S5 — Surface-code stabilizer structure at distance 3.
#[test]
fn distance_three_surface_code_has_consistent_stabilizer_structure() {
    let code = SurfaceCode::new(3).unwrap();
    assert_eq!(code.num_data_qubits(), 9);
    assert_eq!(code.x_stabilizers().len() + code.z_stabilizers().len(), 8);

    for s in code.x_stabilizers().iter().chain(code.z_stabilizers()) {
        let weight = s.support_qubits().len();
        assert!(weight == 2 || weight == 3 || weight == 4);
    }
    for x in code.x_stabilizers() {
        for z in code.z_stabilizers() {
            assert_eq!(x.operator.overlap_count(&z.operator) % 2, 0);
        }
    }
}

/// S6 — Execution-engine step/step-back over X(0); H(0); Z(0).
#[test]
fn execution_engine_steps_forward_back_and_hits_breakpoints() {
    let mut circuit = Circuit::new(1, 0);
    circuit.x(0).unwrap();
    circuit.h(0).unwrap();
    circuit.z(0).unwrap();

    let mut engine = ExecutionEngine::new(circuit);
    engine.add_breakpoint(1);

    engine.step_forward().unwrap();
    engine.step_forward().unwrap();
    assert!(engine.is_at_breakpoint());
    let after_x_h = engine.current_state().clone();
    engine.step_forward().unwrap();

    assert_eq!(engine.current_step(), 3);
    assert_eq!(engine.history().len(), 4);

    engine.step_backward().unwrap();
    assert_eq!(engine.current_state(), &after_x_h);
    assert_eq!(engine.current_step(), 1);
    assert!(engine.is_at_breakpoint());
}

/// Empty syndrome decodes to an empty chain for both decoders (invariant 6).
#[test]
fn empty_syndrome_decodes_to_empty_chain() {
    let code = SurfaceCode::new(3).unwrap();
    let state = code.prepare_logical_zero();
    let syndrome = code.measure_syndromes(&state).unwrap();
    assert_eq!(syndrome.count_violations(), 0);

    let mwpm = MwpmDecoder::new(3);
    let uf = UnionFindDecoder::new(3);
    assert!(mwpm.decode(&syndrome).is_empty());
    assert!(uf.decode(&syndrome).is_empty());
}

/// A noisy single-qubit gate degrades purity relative to the ideal model.
#[test]
fn typical_noise_model_degrades_purity_relative_to_ideal() {
    let mut rho_ideal = DensityMatrix::zero(1);
    rho_ideal.h(0).unwrap();
    let ideal = NoiseModel::ideal();
    ideal.apply_gate_noise(&mut rho_ideal, &GateKind::H, &[0]).unwrap();

    let mut rho_typical = DensityMatrix::zero(1);
    rho_typical.h(0).unwrap();
    let typical = NoiseModel::typical();
    typical.apply_gate_noise(&mut rho_typical, &GateKind::H, &[0]).unwrap();

    let ideal_purity = omniq_core::density_matrix::purity(&rho_ideal).unwrap();
    let typical_purity = omniq_core::density_matrix::purity(&rho_typical).unwrap();
    assert!(close(ideal_purity, 1.0));
    assert!(typical_purity < ideal_purity);
}
