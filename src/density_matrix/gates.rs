//! Unitary conjugation and Kraus-channel application.

use ndarray::Array2;
use num_complex::Complex64;

use super::DensityMatrix;
use crate::error::{Error, Result};
use crate::noise::channels::KrausChannel;
use crate::operators;

impl DensityMatrix {
    /// Conjugates the state by an arbitrary `2^n x 2^n` unitary: `rho -> U rho U†`.
    pub fn apply_unitary_full(&mut self, u: &Array2<Complex64>) -> Result<()> {
        let dim = self.dim();
        if u.dim() != (dim, dim) {
            return Err(Error::InvalidShape(format!(
                "unitary shape {:?} does not match state dimension {dim}",
                u.dim()
            )));
        }
        let u_dagger = operators::conj_transpose(u);
        *self.matrix_mut() = u.dot(self.matrix()).dot(&u_dagger);
        Ok(())
    }

    fn apply_embedded(&mut self, gate: &Array2<Complex64>, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits() {
            return Err(Error::invalid_index(qubit, self.num_qubits()));
        }
        let full = operators::embed_single_qubit(gate, qubit, self.num_qubits());
        self.apply_unitary_full(&full)
    }

    pub fn h(&mut self, qubit: usize) -> Result<()> {
        self.apply_embedded(&operators::hadamard(), qubit)
    }

    pub fn x(&mut self, qubit: usize) -> Result<()> {
        self.apply_embedded(&operators::pauli_x(), qubit)
    }

    pub fn y(&mut self, qubit: usize) -> Result<()> {
        self.apply_embedded(&operators::pauli_y(), qubit)
    }

    pub fn z(&mut self, qubit: usize) -> Result<()> {
        self.apply_embedded(&operators::pauli_z(), qubit)
    }

    pub fn rx(&mut self, qubit: usize, theta: f64) -> Result<()> {
        self.apply_embedded(&operators::rx(theta), qubit)
    }

    pub fn ry(&mut self, qubit: usize, theta: f64) -> Result<()> {
        self.apply_embedded(&operators::ry(theta), qubit)
    }

    pub fn rz(&mut self, qubit: usize, theta: f64) -> Result<()> {
        self.apply_embedded(&operators::rz(theta), qubit)
    }

    pub fn s(&mut self, qubit: usize) -> Result<()> {
        self.apply_embedded(&operators::s_gate(), qubit)
    }

    pub fn sdg(&mut self, qubit: usize) -> Result<()> {
        self.apply_embedded(&operators::sdg_gate(), qubit)
    }

    pub fn t(&mut self, qubit: usize) -> Result<()> {
        self.apply_embedded(&operators::t_gate(), qubit)
    }

    pub fn phase(&mut self, qubit: usize, phi: f64) -> Result<()> {
        self.apply_embedded(&operators::phase(phi), qubit)
    }

    pub fn cnot(&mut self, control: usize, target: usize) -> Result<()> {
        self.apply_controlled(control, target, &operators::pauli_x())
    }

    pub fn cz(&mut self, control: usize, target: usize) -> Result<()> {
        self.apply_controlled(control, target, &operators::pauli_z())
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        if a >= self.num_qubits() || b >= self.num_qubits() {
            return Err(Error::invalid_index(a.max(b), self.num_qubits()));
        }
        if a == b {
            return Ok(());
        }
        let full = Self::embed_two_qubit_block(&operators::swap_matrix(), a, b, self.num_qubits());
        self.apply_unitary_full(&full)
    }

    /// Embeds a 4x4 operator acting on the basis `|a, b>` (`a` the high bit,
    /// `b` the low bit) into the full `n`-qubit space.
    fn embed_two_qubit_block(block: &Array2<Complex64>, a: usize, b: usize, n: usize) -> Array2<Complex64> {
        let dim = 1usize << n;
        let mut full = Array2::<Complex64>::zeros((dim, dim));
        let abit = 1usize << a;
        let bbit = 1usize << b;
        for i in 0..dim {
            let rest = i & !(abit | bbit);
            let a_in = if i & abit != 0 { 1 } else { 0 };
            let b_in = if i & bbit != 0 { 1 } else { 0 };
            let local_in = (a_in << 1) | b_in;
            for local_out in 0..4 {
                let amp = block[[local_out, local_in]];
                if amp == Complex64::new(0.0, 0.0) {
                    continue;
                }
                let a_out = (local_out >> 1) & 1;
                let b_out = local_out & 1;
                let j = rest | (a_out << a) | (b_out << b);
                full[[j, i]] = amp;
            }
        }
        full
    }

    /// Applies `gate` to `target`, controlled on `control`, by embedding the
    /// full `4 x 4` controlled operator into the `n`-qubit space.
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
        let n = self.num_qubits();
        let controlled_block = operators::controlled(gate);
        let full = Self::embed_two_qubit_block(&controlled_block, control, target, n);
        self.apply_unitary_full(&full)
    }

    /// Applies an opaque unitary over an arbitrary-length, ordered qubit
    /// list by conjugating `rho` with its embedding into the full `2^n`
    /// space. The density-matrix counterpart of
    /// [`crate::state_vector::StateVector::apply_custom_unitary`].
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
        self.apply_unitary_full(&full)
    }

    /// Applies a completely-positive trace-preserving channel: `rho -> sum_k E_k rho E_k†`.
    pub fn apply_channel(&mut self, channel: &dyn KrausChannel, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits() {
            return Err(Error::invalid_index(qubit, self.num_qubits()));
        }
        let n = self.num_qubits();
        let mut next = Array2::<Complex64>::zeros((1 << n, 1 << n));
        for kraus in channel.kraus_operators() {
            let embedded = operators::embed_single_qubit(&kraus, qubit, n);
            let term = embedded.dot(self.matrix()).dot(&operators::conj_transpose(&embedded));
            next = next + term;
        }
        *self.matrix_mut() = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_close;

    #[test]
    fn hadamard_then_cnot_on_density_matrix_gives_bell_purity_one() {
        let mut rho = DensityMatrix::zero(2);
        rho.h(0).unwrap();
        rho.cnot(0, 1).unwrap();
        assert_close(super::super::purity(&rho).unwrap(), 1.0);
        assert_close(rho.matrix()[[0, 0]].re, 0.5);
        assert_close(rho.matrix()[[3, 3]].re, 0.5);
    }

    #[test]
    fn control_equals_target_is_rejected() {
        let mut rho = DensityMatrix::zero(2);
        assert!(rho.cnot(0, 0).is_err());
    }

    #[test]
    fn custom_unitary_matching_pauli_x_flips_the_qubit() {
        let mut rho = DensityMatrix::zero(1);
        rho.apply_custom_unitary(&[0], &operators::pauli_x()).unwrap();
        assert_close(rho.matrix()[[1, 1]].re, 1.0);
    }
}
