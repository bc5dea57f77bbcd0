//! Computational-basis probabilities, Pauli expectation values, and
//! probabilistic collapse-and-renormalize measurement.

use rand::rngs::StdRng;
use rand::Rng;

use super::StateVector;
use crate::error::{Error, Result};
use crate::operators;
use crate::types::pauli::{Pauli, PauliString};

/// The result of measuring a single qubit: the classical outcome and the
/// post-measurement (collapsed, renormalized) state.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementOutcome {
    pub qubit: usize,
    pub outcome: bool,
    pub probability: f64,
}

impl StateVector {
    /// `P(qubit == outcome)` without collapsing the state.
    pub fn probability(&self, qubit: usize, outcome: bool) -> Result<f64> {
        if qubit >= self.num_qubits() {
            return Err(Error::invalid_index(qubit, self.num_qubits()));
        }
        let bit = 1usize << qubit;
        let want = if outcome { bit } else { 0 };
        let p: f64 = self
            .amplitudes()
            .iter()
            .enumerate()
            .filter(|(i, _)| (i & bit) == want)
            .map(|(_, a)| a.norm_sqr())
            .sum();
        Ok(p)
    }

    /// Expectation value of a single-qubit Pauli observable on `qubit`.
    pub fn expectation(&self, qubit: usize, observable: Pauli) -> Result<f64> {
        if qubit >= self.num_qubits() {
            return Err(Error::invalid_index(qubit, self.num_qubits()));
        }
        let bit = 1usize << qubit;
        let amps = self.amplitudes();
        let value = match observable {
            Pauli::Z => {
                amps.iter()
                    .enumerate()
                    .map(|(i, a)| {
                        let sign = if i & bit == 0 { 1.0 } else { -1.0 };
                        sign * a.norm_sqr()
                    })
                    .sum()
            }
            Pauli::X => {
                let mut total = 0.0;
                for i in 0..amps.len() {
                    if i & bit == 0 {
                        let j = i | bit;
                        total += 2.0 * (amps[i].conj() * amps[j]).re;
                    }
                }
                total
            }
            Pauli::Y => {
                let mut total = 0.0;
                for i in 0..amps.len() {
                    if i & bit == 0 {
                        let j = i | bit;
                        // <psi| Y |psi> contribution: i * (a_i* a_j - a_j* a_i) summed pairwise.
                        total += 2.0 * (amps[i].conj() * amps[j] * num_complex::Complex64::i()).re;
                    }
                }
                total
            }
            Pauli::I => 1.0,
        };
        Ok(value)
    }

    /// Expectation value `<psi|P|psi>` of a full-register Pauli string, used
    /// by [`crate::surface_code`] to extract stabilizer syndromes. Builds the
    /// dense `2^n x 2^n` operator, so it is only practical for the qubit
    /// counts a surface-code patch needs, not whole-register algorithms.
    pub fn pauli_string_expectation(&self, paulis: &PauliString) -> Result<f64> {
        let n = self.num_qubits();
        if paulis.num_qubits() != n {
            return Err(Error::InvalidShape(format!(
                "pauli string length {} does not match {n} qubits",
                paulis.num_qubits()
            )));
        }
        let mut full = ndarray::Array2::<num_complex::Complex64>::eye(1);
        for q in (0..n).rev() {
            let single = match paulis.get(q) {
                Pauli::I => operators::identity(),
                Pauli::X => operators::pauli_x(),
                Pauli::Y => operators::pauli_y(),
                Pauli::Z => operators::pauli_z(),
            };
            full = operators::tensor_product(&full, &single);
        }
        let amps = self.amplitudes();
        let applied = full.dot(amps);
        let value: num_complex::Complex64 =
            amps.iter().zip(applied.iter()).map(|(a, b)| a.conj() * b).sum();
        Ok(value.re)
    }

    /// Measures `qubit` in the computational basis, collapsing and
    /// renormalizing the state in place. Uses `rng` so callers control
    /// reproducibility; the reference implementation's deterministic-zero bug
    /// (always returning `false`) is not reproduced here.
    pub fn measure(&mut self, qubit: usize, rng: &mut StdRng) -> Result<MeasurementOutcome> {
        let p1 = self.probability(qubit, true)?;
        let outcome = rng.gen::<f64>() < p1;
        let probability = if outcome { p1 } else { 1.0 - p1 };
        self.collapse(qubit, outcome, probability)?;
        Ok(MeasurementOutcome { qubit, outcome, probability })
    }

    fn collapse(&mut self, qubit: usize, outcome: bool, probability: f64) -> Result<()> {
        if probability < crate::TOLERANCE {
            return Err(Error::NotNormalized);
        }
        let bit = 1usize << qubit;
        let want = if outcome { bit } else { 0 };
        let norm = probability.sqrt();
        let amps = self.amplitudes_mut();
        for (i, a) in amps.iter_mut().enumerate() {
            if (i & bit) == want {
                *a /= norm;
            } else {
                *a = num_complex::Complex64::new(0.0, 0.0);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn plus_state_has_equal_measurement_probabilities() {
        let mut s = StateVector::zero(1);
        s.h(0).unwrap();
        assert!((s.probability(0, true).unwrap() - 0.5).abs() < 1e-9);
        assert!((s.probability(0, false).unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn plus_state_has_expectation_x_one_z_zero() {
        let mut s = StateVector::zero(1);
        s.h(0).unwrap();
        assert!((s.expectation(0, Pauli::X).unwrap() - 1.0).abs() < 1e-9);
        assert!(s.expectation(0, Pauli::Z).unwrap().abs() < 1e-9);
    }

    #[test]
    fn measuring_zero_state_always_returns_false() {
        let mut s = StateVector::zero(1);
        let mut rng = StdRng::seed_from_u64(7);
        let outcome = s.measure(0, &mut rng).unwrap();
        assert!(!outcome.outcome);
        assert!((outcome.probability - 1.0).abs() < 1e-9);
    }

    #[test]
    fn measuring_bell_state_correlates_both_qubits() {
        let mut s = StateVector::zero(2);
        s.h(0).unwrap();
        s.cnot(0, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let first = s.measure(0, &mut rng).unwrap();
        let second = s.measure(1, &mut rng).unwrap();
        assert_eq!(first.outcome, second.outcome);
    }
}
