//! Measurement in the Clifford simulator: random when the measured qubit
//! anticommutes with some stabilizer, deterministic (read off the tableau)
//! otherwise.

use rand::rngs::StdRng;
use rand::Rng;

use super::CliffordSim;
use crate::error::Result;

/// The outcome of measuring a qubit in [`CliffordSim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliffordMeasurementOutcome {
    pub qubit: usize,
    pub outcome: bool,
    /// True if the outcome was random (the qubit anticommuted with a
    /// stabilizer); false if it was read off the tableau deterministically.
    pub random: bool,
}

impl CliffordSim {
    /// Measures `qubit` in the Z basis, collapsing the tableau.
    ///
    /// Scans the stabilizer rows (`n..2n`) for one whose X part touches
    /// `qubit` — if found the outcome is uniformly random and that stabilizer
    /// is replaced by `±Z_qubit`; otherwise the outcome is forced and read off
    /// the destabilizer rows, never defaulting to zero as the reference
    /// implementation's unseeded-RNG path could appear to.
    pub fn measure(&mut self, qubit: usize, rng: &mut StdRng) -> Result<CliffordMeasurementOutcome> {
        self.check_qubit(qubit)?;
        let n = self.num_qubits;

        let anticommuting_row = (n..2 * n).find(|&i| self.x[[i, qubit]] == 1);

        if let Some(p) = anticommuting_row {
            let outcome = rng.gen::<bool>();
            for i in 0..2 * n {
                if i != p && self.x[[i, qubit]] == 1 {
                    self.rowsum(i, p);
                }
            }
            for j in 0..n {
                self.x[[p, j]] = 0;
                self.z[[p, j]] = 0;
            }
            self.z[[p, qubit]] = 1;
            self.r[p] = outcome as u8;

            Ok(CliffordMeasurementOutcome { qubit, outcome, random: true })
        } else {
            // Deterministic: scratch row 2n is implicit here as an accumulator
            // over destabilizers whose partner stabilizer touches `qubit`.
            let mut outcome = false;
            for i in 0..n {
                if self.x[[i, qubit]] == 1 {
                    outcome ^= self.r[n + i] == 1;
                }
            }
            Ok(CliffordMeasurementOutcome { qubit, outcome, random: false })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn measuring_zero_state_is_deterministically_false() {
        let mut sim = CliffordSim::new(1);
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = sim.measure(0, &mut rng).unwrap();
        assert!(!outcome.random);
        assert!(!outcome.outcome);
    }

    #[test]
    fn measuring_plus_state_is_random() {
        let mut sim = CliffordSim::new(1);
        sim.h(0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = sim.measure(0, &mut rng).unwrap();
        assert!(outcome.random);
    }

    #[test]
    fn bell_pair_measurements_are_correlated() {
        let mut sim = CliffordSim::new(2);
        sim.h(0).unwrap();
        sim.cnot(0, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let first = sim.measure(0, &mut rng).unwrap();
        let second = sim.measure(1, &mut rng).unwrap();
        assert_eq!(first.outcome, second.outcome);
    }
}
