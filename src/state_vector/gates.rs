//! In-place gate application: every gate walks the `2^n` amplitude array
//! directly instead of building and multiplying a dense `2^n × 2^n` matrix.

use ndarray::Array2;
use num_complex::Complex64;

use super::StateVector;
use crate::error::{Error, Result};
use crate::operators;

impl StateVector {
    /// Applies an arbitrary 2×2 unitary to `qubit` in place.
    pub fn apply_single_qubit(&mut self, qubit: usize, gate: &Array2<Complex64>) -> Result<()> {
        if qubit >= self.num_qubits() {
            return Err(Error::invalid_index(qubit, self.num_qubits()));
        }
        let (a, b, cc, d) = (gate[[0, 0]], gate[[0, 1]], gate[[1, 0]], gate[[1, 1]]);
        let bit = 1usize << qubit;
        let dim = self.dim();
        let amps = self.amplitudes_mut();
        let mut i = 0;
        while i < dim {
            if i & bit == 0 {
                let i1 = i | bit;
                let a0 = amps[i];
                let a1 = amps[i1];
                amps[i] = a * a0 + b * a1;
                amps[i1] = cc * a0 + d * a1;
            }
            i += 1;
        }
        Ok(())
    }

    /// Applies a gate controlled on `control` to `target` in place: when
    /// `control`'s bit is 0 the amplitude is untouched, otherwise `gate` acts
    /// on the `target` subspace.
    pub fn apply_controlled(
        &mut self,
        control: usize,
        target: usize,
        gate: &Array2<Complex64>,
    ) -> Result<()> {
        if control >= self.num_qubits() || target >= self.num_qubits() {
            return Err(Error::invalid_index(control.max(target), self.num_qubits()));
        }
        if control == target {
            return Err(Error::InvalidGate("control and target must differ".into()));
        }
        let (a, b, cc, d) = (gate[[0, 0]], gate[[0, 1]], gate[[1, 0]], gate[[1, 1]]);
        let cbit = 1usize << control;
        let tbit = 1usize << target;
        let dim = self.dim();
        let amps = self.amplitudes_mut();
        let mut i = 0;
        while i < dim {
            if i & cbit != 0 && i & tbit == 0 {
                let i1 = i | tbit;
                let a0 = amps[i];
                let a1 = amps[i1];
                amps[i] = a * a0 + b * a1;
                amps[i1] = cc * a0 + d * a1;
            }
            i += 1;
        }
        Ok(())
    }

    pub fn h(&mut self, qubit: usize) -> Result<()> {
        self.apply_single_qubit(qubit, &operators::hadamard())
    }

    pub fn x(&mut self, qubit: usize) -> Result<()> {
        self.apply_single_qubit(qubit, &operators::pauli_x())
    }

    pub fn y(&mut self, qubit: usize) -> Result<()> {
        self.apply_single_qubit(qubit, &operators::pauli_y())
    }

    pub fn z(&mut self, qubit: usize) -> Result<()> {
        self.apply_single_qubit(qubit, &operators::pauli_z())
    }

    pub fn s(&mut self, qubit: usize) -> Result<()> {
        self.apply_single_qubit(qubit, &operators::s_gate())
    }

    pub fn t(&mut self, qubit: usize) -> Result<()> {
        self.apply_single_qubit(qubit, &operators::t_gate())
    }

    pub fn rx(&mut self, qubit: usize, theta: f64) -> Result<()> {
        self.apply_single_qubit(qubit, &operators::rx(theta))
    }

    pub fn ry(&mut self, qubit: usize, theta: f64) -> Result<()> {
        self.apply_single_qubit(qubit, &operators::ry(theta))
    }

    pub fn rz(&mut self, qubit: usize, theta: f64) -> Result<()> {
        self.apply_single_qubit(qubit, &operators::rz(theta))
    }

    pub fn phase(&mut self, qubit: usize, phi: f64) -> Result<()> {
        self.apply_single_qubit(qubit, &operators::phase(phi))
    }

    pub fn cnot(&mut self, control: usize, target: usize) -> Result<()> {
        self.apply_controlled(control, target, &operators::pauli_x())
    }

    pub fn cz(&mut self, control: usize, target: usize) -> Result<()> {
        self.apply_controlled(control, target, &operators::pauli_z())
    }

    /// Applies any single-qubit unitary as a controlled gate — the case the
    /// reference implementation only supports for X (CNOT).
    pub fn controlled_unitary(
        &mut self,
        control: usize,
        target: usize,
        unitary: &Array2<Complex64>,
    ) -> Result<()> {
        self.apply_controlled(control, target, unitary)
    }

    /// Applies an opaque unitary over an arbitrary-length, ordered qubit
    /// list (`qubits[0]` the most-significant local bit) by embedding it into
    /// the full `2^n` space. Used by [`crate::circuit::GateKind::Custom`],
    /// which carries no fixed arity, unlike the single- and two-qubit gates
    /// above that update amplitude pairs/quadruples directly.
    pub fn apply_custom_unitary(&mut self, qubits: &[usize], matrix: &Array2<Complex64>) -> Result<()> {
        for &q in qubits {
            if q >= self.num_qubits() {
                return Err(Error::invalid_index(q, self.num_qubits()));
            }
        }
        let mut sorted = qubits.to_vec();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(Error::InvalidGate("custom gate qubits must be distinct".into()));
        }
        let full = operators::embed_block(matrix, qubits, self.num_qubits());
        let amps = self.amplitudes();
        let next = full.dot(amps);
        *self.amplitudes_mut() = next;
        Ok(())
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        if a >= self.num_qubits() || b >= self.num_qubits() {
            return Err(Error::invalid_index(a.max(b), self.num_qubits()));
        }
        if a == b {
            return Ok(());
        }
        let (abit, bbit) = (1usize << a, 1usize << b);
        let dim = self.dim();
        let amps = self.amplitudes_mut();
        for i in 0..dim {
            let ai = i & abit != 0;
            let bi = i & bbit != 0;
            if ai && !bi {
                let j = (i & !abit) | bbit;
                amps.swap(i, j);
            }
        }
        Ok(())
    }
}
