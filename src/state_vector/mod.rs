//! Dense state-vector simulation: a length-`2^n` complex amplitude array with
//! in-place gate application, measurement, and the partial-trace/tensor-product
//! operations needed to compose and decompose multi-qubit states.

mod gates;
mod measurement;

use ndarray::Array1;
use num_complex::Complex64;

use crate::error::{Error, Result};
use crate::operators;
use crate::TOLERANCE;

pub use measurement::MeasurementOutcome;

/// A pure quantum state of `n` qubits as `2^n` complex amplitudes, qubit 0
/// occupying the least-significant bit of the basis index.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    amplitudes: Array1<Complex64>,
    num_qubits: usize,
}

impl StateVector {
    /// Builds the `|0...0>` state on `n` qubits.
    pub fn zero(n: usize) -> Self {
        let mut amplitudes = Array1::<Complex64>::zeros(1 << n);
        amplitudes[0] = Complex64::new(1.0, 0.0);
        StateVector { amplitudes, num_qubits: n }
    }

    /// Builds a state from raw amplitudes; fails unless the length is a power
    /// of two and the vector is normalized to within [`TOLERANCE`].
    pub fn from_amplitudes(amplitudes: Array1<Complex64>) -> Result<Self> {
        let len = amplitudes.len();
        if len == 0 || (len & (len - 1)) != 0 {
            return Err(Error::InvalidShape(format!(
                "amplitude vector length {len} is not a power of two"
            )));
        }
        let norm_sq: f64 = amplitudes.iter().map(|a| a.norm_sqr()).sum();
        if (norm_sq - 1.0).abs() > TOLERANCE {
            return Err(Error::NotNormalized);
        }
        let num_qubits = len.trailing_zeros() as usize;
        Ok(StateVector { amplitudes, num_qubits })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut Array1<Complex64> {
        &mut self.amplitudes
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(Error::invalid_index(qubit, self.num_qubits));
        }
        Ok(())
    }

    /// `‖ψ‖² − 1`, the normalization residual.
    pub fn norm_sq(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Rescales amplitudes so the state is exactly normalized; a no-op if
    /// already within [`TOLERANCE`].
    pub fn normalize(&mut self) -> Result<()> {
        let norm = self.norm_sq().sqrt();
        if norm < TOLERANCE {
            return Err(Error::NotNormalized);
        }
        self.amplitudes.mapv_inplace(|a| a / norm);
        Ok(())
    }

    /// Tensors `self ⊗ other`, concatenating qubit registers (`self`'s qubits
    /// keep their indices, `other`'s are shifted up by `self.num_qubits()`).
    pub fn tensor_product(&self, other: &StateVector) -> StateVector {
        let n = self.num_qubits + other.num_qubits;
        let mut amplitudes = Array1::<Complex64>::zeros(1 << n);
        for i in 0..self.amplitudes.len() {
            for j in 0..other.amplitudes.len() {
                amplitudes[(j << self.num_qubits) | i] = self.amplitudes[i] * other.amplitudes[j];
            }
        }
        StateVector { amplitudes, num_qubits: n }
    }

    /// Reduces this pure state to the density matrix obtained by tracing out
    /// `qubit`. The result is mixed whenever `qubit` is entangled with the rest.
    pub fn partial_trace(&self, qubit: usize) -> Result<crate::density_matrix::DensityMatrix> {
        self.check_qubit(qubit)?;
        let full = crate::density_matrix::DensityMatrix::from_pure(self);
        full.partial_trace(qubit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_eq_complex;

    #[test]
    fn zero_state_has_unit_amplitude_on_basis_zero() {
        let s = StateVector::zero(3);
        assert_eq_complex(s.amplitudes()[0], Complex64::new(1.0, 0.0));
        for i in 1..8 {
            assert_eq_complex(s.amplitudes()[i], Complex64::new(0.0, 0.0));
        }
    }

    #[test]
    fn from_amplitudes_rejects_non_power_of_two() {
        let bad = Array1::from(vec![Complex64::new(1.0, 0.0); 3]);
        assert!(StateVector::from_amplitudes(bad).is_err());
    }

    #[test]
    fn from_amplitudes_rejects_unnormalized() {
        let bad = Array1::from(vec![Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)]);
        assert!(StateVector::from_amplitudes(bad).is_err());
    }

    #[test]
    fn tensor_product_of_zero_states_is_zero_state() {
        let a = StateVector::zero(1);
        let b = StateVector::zero(2);
        let prod = a.tensor_product(&b);
        assert_eq!(prod.num_qubits(), 3);
        assert_eq_complex(prod.amplitudes()[0], Complex64::new(1.0, 0.0));
    }
}
