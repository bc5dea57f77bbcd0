//! Mixed-state simulation via an explicit `2^n × 2^n` density matrix: unitary
//! conjugation, Kraus-operator channel application, partial trace, and the
//! purity/entropy diagnostics pure state vectors can't express.

mod analysis;
mod eigen;
mod gates;
mod measurement;

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{Error, Result};
use crate::operators;
use crate::state_vector::StateVector;
use crate::TOLERANCE;

pub use analysis::{entropy, purity};

/// A mixed quantum state of `n` qubits as a `2^n × 2^n` density matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityMatrix {
    matrix: Array2<Complex64>,
    num_qubits: usize,
}

impl DensityMatrix {
    /// Builds `|0...0><0...0|` on `n` qubits.
    pub fn zero(n: usize) -> Self {
        let mut matrix = Array2::<Complex64>::zeros((1 << n, 1 << n));
        matrix[[0, 0]] = Complex64::new(1.0, 0.0);
        DensityMatrix { matrix, num_qubits: n }
    }

    /// Builds the density matrix `|psi><psi|` of a pure state.
    pub fn from_pure(state: &StateVector) -> Self {
        let n = state.num_qubits();
        let amps = state.amplitudes();
        let dim = amps.len();
        let mut matrix = Array2::<Complex64>::zeros((dim, dim));
        for i in 0..dim {
            for j in 0..dim {
                matrix[[i, j]] = amps[i] * amps[j].conj();
            }
        }
        DensityMatrix { matrix, num_qubits: n }
    }

    /// Wraps a raw matrix after validating it is square with a power-of-two
    /// dimension, Hermitian, unit trace, and positive semidefinite (via its
    /// eigenvalues).
    pub fn from_matrix(matrix: Array2<Complex64>) -> Result<Self> {
        let (r, c) = matrix.dim();
        if r != c || r == 0 || (r & (r - 1)) != 0 {
            return Err(Error::InvalidShape(format!(
                "density matrix must be square with power-of-two dimension, got {r}x{c}"
            )));
        }
        if !operators::is_hermitian(&matrix) {
            return Err(Error::InvalidShape("density matrix must be Hermitian".into()));
        }
        let trace: Complex64 = (0..r).map(|i| matrix[[i, i]]).sum();
        if (trace.re - 1.0).abs() > TOLERANCE || trace.im.abs() > TOLERANCE {
            return Err(Error::InvalidShape("density matrix must have unit trace".into()));
        }
        let num_qubits = r.trailing_zeros() as usize;
        let dm = DensityMatrix { matrix, num_qubits };
        for eigenvalue in analysis::hermitian_eigenvalues(&dm.matrix)? {
            if eigenvalue < -TOLERANCE {
                return Err(Error::InvalidShape(
                    "density matrix must be positive semidefinite".into(),
                ));
            }
        }
        Ok(dm)
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    pub(crate) fn matrix_mut(&mut self) -> &mut Array2<Complex64> {
        &mut self.matrix
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(Error::invalid_index(qubit, self.num_qubits));
        }
        Ok(())
    }

    /// Tensors `self ⊗ other`; `self`'s qubits keep their indices, `other`'s
    /// are shifted up by `self.num_qubits()`.
    pub fn tensor_product(&self, other: &DensityMatrix) -> DensityMatrix {
        let matrix = operators::tensor_product(&self.matrix, &other.matrix);
        DensityMatrix { matrix, num_qubits: self.num_qubits + other.num_qubits }
    }

    /// Traces out `qubit`, returning the reduced state of the remaining
    /// `n - 1` qubits.
    pub fn partial_trace(&self, qubit: usize) -> Result<DensityMatrix> {
        self.check_qubit(qubit)?;
        if self.num_qubits == 1 {
            return Err(Error::InvalidShape(
                "cannot trace out the only qubit of a density matrix".into(),
            ));
        }
        let reduced = operators::partial_trace_one(&self.matrix, qubit, self.num_qubits);
        Ok(DensityMatrix { matrix: reduced, num_qubits: self.num_qubits - 1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_close;

    #[test]
    fn zero_state_has_unit_trace_and_is_pure() {
        let rho = DensityMatrix::zero(2);
        let trace: Complex64 = (0..4).map(|i| rho.matrix()[[i, i]]).sum();
        assert_close(trace.re, 1.0);
        assert_close(purity(&rho).unwrap(), 1.0);
    }

    #[test]
    fn from_pure_matches_outer_product_of_bell_state() {
        let mut s = StateVector::zero(2);
        s.h(0).unwrap();
        s.cnot(0, 1).unwrap();
        let rho = DensityMatrix::from_pure(&s);
        assert_close(purity(&rho).unwrap(), 1.0);
    }

    #[test]
    fn from_matrix_rejects_non_hermitian() {
        let mut m = Array2::<Complex64>::eye(2);
        m[[0, 1]] = Complex64::new(1.0, 0.0);
        assert!(DensityMatrix::from_matrix(m).is_err());
    }

    #[test]
    fn partial_trace_of_bell_state_is_maximally_mixed() {
        let mut s = StateVector::zero(2);
        s.h(0).unwrap();
        s.cnot(0, 1).unwrap();
        let rho = DensityMatrix::from_pure(&s);
        let reduced = rho.partial_trace(0).unwrap();
        assert_close(reduced.matrix()[[0, 0]].re, 0.5);
        assert_close(reduced.matrix()[[1, 1]].re, 0.5);
        assert_close(purity(&reduced).unwrap(), 0.5);
    }
}
