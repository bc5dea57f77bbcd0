//! A circuit is a flat, replayable list of [`GateDescriptor`]s that can be
//! played forward one gate at a time against a [`StateVector`] or a
//! [`DensityMatrix`] — the latter used by [`crate::exec_engine`] so noise can
//! be injected between gates.

mod gate;

pub use gate::{GateDescriptor, GateKind};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::density_matrix::DensityMatrix;
use crate::error::{Error, Result};
use crate::state_vector::{MeasurementOutcome, StateVector};

/// An ordered list of gates over a fixed number of qubits and classical bits.
#[derive(Clone)]
pub struct Circuit {
    num_qubits: usize,
    num_clbits: usize,
    gates: Vec<GateDescriptor>,
    classical: Vec<bool>,
    rng: StdRng,
}

impl Circuit {
    /// An empty circuit over `num_qubits` qubits and `num_clbits` classical
    /// bits, seeded from OS entropy.
    pub fn new(num_qubits: usize, num_clbits: usize) -> Self {
        Circuit {
            num_qubits,
            num_clbits,
            gates: Vec::new(),
            classical: vec![false; num_clbits],
            rng: StdRng::from_entropy(),
        }
    }

    /// Like [`Circuit::new`] but with a deterministic measurement RNG, for
    /// reproducible tests and debugging sessions.
    pub fn with_seed(num_qubits: usize, num_clbits: usize, seed: u64) -> Self {
        Circuit {
            num_qubits,
            num_clbits,
            gates: Vec::new(),
            classical: vec![false; num_clbits],
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Circuit depth. A true critical-path depth would track per-qubit gate
    /// chains; here depth is simply the gate count, as the contract allows.
    pub fn depth(&self) -> usize {
        self.gates.len()
    }

    pub fn gates(&self) -> &[GateDescriptor] {
        &self.gates
    }

    pub fn classical_bits(&self) -> &[bool] {
        &self.classical
    }

    /// Removes every gate and resets the classical register, keeping the
    /// qubit/classical-bit counts.
    pub fn clear(&mut self) {
        self.gates.clear();
        self.classical.iter_mut().for_each(|b| *b = false);
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(Error::invalid_index(qubit, self.num_qubits));
        }
        Ok(())
    }

    fn push(&mut self, kind: GateKind, qubits: Vec<usize>) -> Result<()> {
        for &q in &qubits {
            self.check_qubit(q)?;
        }
        self.gates.push(GateDescriptor::new(kind, qubits)?);
        Ok(())
    }

    pub fn h(&mut self, qubit: usize) -> Result<()> {
        self.push(GateKind::H, vec![qubit])
    }

    pub fn x(&mut self, qubit: usize) -> Result<()> {
        self.push(GateKind::X, vec![qubit])
    }

    pub fn y(&mut self, qubit: usize) -> Result<()> {
        self.push(GateKind::Y, vec![qubit])
    }

    pub fn z(&mut self, qubit: usize) -> Result<()> {
        self.push(GateKind::Z, vec![qubit])
    }

    pub fn s(&mut self, qubit: usize) -> Result<()> {
        self.push(GateKind::S, vec![qubit])
    }

    pub fn sdg(&mut self, qubit: usize) -> Result<()> {
        self.push(GateKind::Sdg, vec![qubit])
    }

    pub fn t(&mut self, qubit: usize) -> Result<()> {
        self.push(GateKind::T, vec![qubit])
    }

    pub fn rx(&mut self, qubit: usize, theta: f64) -> Result<()> {
        self.push(GateKind::Rx(theta), vec![qubit])
    }

    pub fn ry(&mut self, qubit: usize, theta: f64) -> Result<()> {
        self.push(GateKind::Ry(theta), vec![qubit])
    }

    pub fn rz(&mut self, qubit: usize, theta: f64) -> Result<()> {
        self.push(GateKind::Rz(theta), vec![qubit])
    }

    pub fn phase(&mut self, qubit: usize, phi: f64) -> Result<()> {
        self.push(GateKind::Phase(phi), vec![qubit])
    }

    pub fn cnot(&mut self, control: usize, target: usize) -> Result<()> {
        self.push(GateKind::Cnot, vec![control, target])
    }

    pub fn cz(&mut self, control: usize, target: usize) -> Result<()> {
        self.push(GateKind::Cz, vec![control, target])
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.push(GateKind::Swap, vec![a, b])
    }

    pub fn controlled_unitary(
        &mut self,
        control: usize,
        target: usize,
        matrix: ndarray::Array2<num_complex::Complex64>,
    ) -> Result<()> {
        self.push(GateKind::ControlledUnitary { matrix }, vec![control, target])
    }

    /// Appends an opaque user-supplied unitary (CUSTOM in the external gate
    /// vocabulary): `matrix` must be `2^k × 2^k` for `k = qubits.len()`.
    pub fn custom(
        &mut self,
        name: impl Into<String>,
        qubits: Vec<usize>,
        matrix: ndarray::Array2<num_complex::Complex64>,
    ) -> Result<()> {
        self.push(GateKind::Custom { name: name.into(), matrix }, qubits)
    }

    pub fn measure(&mut self, qubit: usize, classical_bit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        if classical_bit >= self.num_clbits {
            return Err(Error::invalid_index(classical_bit, self.num_clbits));
        }
        self.gates.push(GateDescriptor::measurement(qubit, classical_bit));
        Ok(())
    }

    /// Plays gate `step` against `state`, recording any measurement outcome
    /// into the classical register.
    pub fn execute_step(&mut self, state: &mut StateVector, step: usize) -> Result<Option<MeasurementOutcome>> {
        if step >= self.gates.len() {
            return Err(Error::invalid_index(step, self.gates.len()));
        }
        let gate = self.gates[step].clone();
        let outcome = apply_gate_to_state(&gate, state, &mut self.rng)?;
        if let (Some(out), Some(bit)) = (&outcome, gate.classical_bit) {
            self.classical[bit] = out.outcome;
        }
        Ok(outcome)
    }

    /// Plays every gate against `state` in order.
    pub fn execute_all(&mut self, state: &mut StateVector) -> Result<()> {
        for step in 0..self.gates.len() {
            self.execute_step(state, step)?;
        }
        Ok(())
    }

    /// Plays gate `step` against a density matrix, optionally injecting gate
    /// noise from `noise` immediately afterward.
    pub fn execute_step_density(
        &mut self,
        rho: &mut DensityMatrix,
        step: usize,
        noise: Option<&crate::noise::NoiseModel>,
    ) -> Result<Option<MeasurementOutcome>> {
        if step >= self.gates.len() {
            return Err(Error::invalid_index(step, self.gates.len()));
        }
        let gate = self.gates[step].clone();
        let outcome = apply_gate_to_density(&gate, rho, &mut self.rng)?;
        if let (Some(out), Some(bit)) = (&outcome, gate.classical_bit) {
            self.classical[bit] = out.outcome;
        }
        if let Some(model) = noise {
            if gate.kind != GateKind::Measure {
                model.apply_gate_noise(rho, &gate.kind, &gate.qubits)?;
            }
        }
        Ok(outcome)
    }

    /// A textual one-line description of gate `step`, for debugging and logs.
    pub fn describe_step(&self, step: usize) -> Result<String> {
        self.gates
            .get(step)
            .map(|g| g.describe())
            .ok_or_else(|| Error::invalid_index(step, self.gates.len()))
    }
}

/// Dispatches a single gate descriptor against a state vector.
pub(crate) fn apply_gate_to_state(
    gate: &GateDescriptor,
    state: &mut StateVector,
    rng: &mut StdRng,
) -> Result<Option<MeasurementOutcome>> {
    let q = gate.qubits.clone();
    match &gate.kind {
        GateKind::H => state.h(q[0]).map(|_| None),
        GateKind::X => state.x(q[0]).map(|_| None),
        GateKind::Y => state.y(q[0]).map(|_| None),
        GateKind::Z => state.z(q[0]).map(|_| None),
        GateKind::S => state.s(q[0]).map(|_| None),
        GateKind::Sdg => state.apply_single_qubit(q[0], &crate::operators::sdg_gate()).map(|_| None),
        GateKind::T => state.t(q[0]).map(|_| None),
        GateKind::Rx(t) => state.rx(q[0], *t).map(|_| None),
        GateKind::Ry(t) => state.ry(q[0], *t).map(|_| None),
        GateKind::Rz(t) => state.rz(q[0], *t).map(|_| None),
        GateKind::Phase(p) => state.phase(q[0], *p).map(|_| None),
        GateKind::Cnot => state.cnot(q[0], q[1]).map(|_| None),
        GateKind::Cz => state.cz(q[0], q[1]).map(|_| None),
        GateKind::Swap => state.swap(q[0], q[1]).map(|_| None),
        GateKind::ControlledUnitary { matrix } => state.controlled_unitary(q[0], q[1], matrix).map(|_| None),
        GateKind::Custom { matrix, .. } => state.apply_custom_unitary(&q, matrix).map(|_| None),
        GateKind::Measure => state.measure(q[0], rng).map(Some),
    }
}

/// Dispatches a single gate descriptor against a density matrix.
pub(crate) fn apply_gate_to_density(
    gate: &GateDescriptor,
    rho: &mut DensityMatrix,
    rng: &mut StdRng,
) -> Result<Option<MeasurementOutcome>> {
    let q = gate.qubits.clone();
    match &gate.kind {
        GateKind::H => rho.h(q[0]).map(|_| None),
        GateKind::X => rho.x(q[0]).map(|_| None),
        GateKind::Y => rho.y(q[0]).map(|_| None),
        GateKind::Z => rho.z(q[0]).map(|_| None),
        GateKind::S => rho.s(q[0]).map(|_| None),
        GateKind::Sdg => rho.sdg(q[0]).map(|_| None),
        GateKind::T => rho.t(q[0]).map(|_| None),
        GateKind::Rx(t) => rho.rx(q[0], *t).map(|_| None),
        GateKind::Ry(t) => rho.ry(q[0], *t).map(|_| None),
        GateKind::Rz(t) => rho.rz(q[0], *t).map(|_| None),
        GateKind::Phase(p) => rho.phase(q[0], *p).map(|_| None),
        GateKind::Cnot => rho.cnot(q[0], q[1]).map(|_| None),
        GateKind::Cz => rho.cz(q[0], q[1]).map(|_| None),
        GateKind::Swap => rho.swap(q[0], q[1]).map(|_| None),
        GateKind::ControlledUnitary { matrix } => rho.apply_controlled(q[0], q[1], matrix).map(|_| None),
        GateKind::Custom { matrix, .. } => rho.apply_custom_unitary(&q, matrix).map(|_| None),
        GateKind::Measure => rho.measure(q[0], rng).map(Some),
    }
}
