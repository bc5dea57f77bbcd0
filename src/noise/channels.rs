//! Single-qubit Kraus channels: amplitude damping, phase damping, and
//! depolarizing noise, each exposing its Kraus operators and a CPTP check.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{Error, Result};
use crate::operators;
use crate::TOLERANCE;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// A single-qubit completely-positive trace-preserving map, expressed as a
/// finite set of Kraus operators satisfying `sum_k Ek† Ek = I`.
pub trait KrausChannel: std::fmt::Debug {
    /// The channel's Kraus operators, each a 2x2 matrix.
    fn kraus_operators(&self) -> Vec<Array2<Complex64>>;

    /// Verifies the completeness relation `sum_k Ek† Ek = I` to within
    /// [`TOLERANCE`]; fails with [`Error::CPTPViolation`] otherwise.
    fn verify_cptp(&self) -> Result<()> {
        let dim = 2;
        let mut sum = Array2::<Complex64>::zeros((dim, dim));
        for e in self.kraus_operators() {
            sum = sum + operators::conj_transpose(&e).dot(&e);
        }
        let identity = Array2::<Complex64>::eye(dim);
        let residual = operators::frobenius_norm(&(sum - identity));
        if residual > TOLERANCE {
            return Err(Error::CPTPViolation { residual });
        }
        Ok(())
    }
}

/// Amplitude damping with decay probability `gamma` (the `|1> -> |0>` relaxation
/// channel modeling T1 decay).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudeDampingChannel {
    pub gamma: f64,
}

impl AmplitudeDampingChannel {
    pub fn new(gamma: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&gamma) {
            return Err(Error::InvalidParameter(format!(
                "amplitude damping gamma must be in [0, 1], got {gamma}"
            )));
        }
        Ok(AmplitudeDampingChannel { gamma })
    }

    /// Builds the channel from a relaxation time constant `t1` and an
    /// elapsed duration `t`, both in seconds: `gamma = 1 - e^(-t/T1)`.
    pub fn from_t1(t1: f64, t: f64) -> Result<Self> {
        if t1 <= 0.0 || t < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "T1 must be positive and elapsed time non-negative, got T1={t1}, t={t}"
            )));
        }
        let gamma = 1.0 - (-t / t1).exp();
        AmplitudeDampingChannel::new(gamma.clamp(0.0, 1.0))
    }
}

impl KrausChannel for AmplitudeDampingChannel {
    fn kraus_operators(&self) -> Vec<Array2<Complex64>> {
        let g = self.gamma;
        let e0 = Array2::from_shape_vec(
            (2, 2),
            vec![c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c((1.0 - g).sqrt(), 0.0)],
        )
        .expect("fixed 2x2 shape");
        let e1 = Array2::from_shape_vec(
            (2, 2),
            vec![c(0.0, 0.0), c(g.sqrt(), 0.0), c(0.0, 0.0), c(0.0, 0.0)],
        )
        .expect("fixed 2x2 shape");
        vec![e0, e1]
    }
}

/// Pure dephasing with probability `lambda` (loses off-diagonal coherence
/// without population transfer, modeling T2 decay beyond what T1 alone causes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseDampingChannel {
    pub lambda: f64,
}

impl PhaseDampingChannel {
    pub fn new(lambda: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&lambda) {
            return Err(Error::InvalidParameter(format!(
                "phase damping lambda must be in [0, 1], got {lambda}"
            )));
        }
        Ok(PhaseDampingChannel { lambda })
    }

    /// Builds the channel from a dephasing time constant `t2` and an elapsed
    /// duration `t`, both in seconds: `lambda = 1 - e^(-t/T2)`.
    pub fn from_t2(t2: f64, t: f64) -> Result<Self> {
        if t2 <= 0.0 || t < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "T2 must be positive and elapsed time non-negative, got T2={t2}, t={t}"
            )));
        }
        let lambda = 1.0 - (-t / t2).exp();
        PhaseDampingChannel::new(lambda.clamp(0.0, 1.0))
    }
}

impl KrausChannel for PhaseDampingChannel {
    fn kraus_operators(&self) -> Vec<Array2<Complex64>> {
        let l = self.lambda;
        let e0 = Array2::from_shape_vec(
            (2, 2),
            vec![c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c((1.0 - l).sqrt(), 0.0)],
        )
        .expect("fixed 2x2 shape");
        let e1 = Array2::from_shape_vec(
            (2, 2),
            vec![c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(l.sqrt(), 0.0)],
        )
        .expect("fixed 2x2 shape");
        vec![e0, e1]
    }
}

/// Depolarizing noise with probability `p`: with probability `1-p` the state
/// is untouched, otherwise one of X, Y, Z is applied with probability `p/3` each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepolarizingChannel {
    pub p: f64,
}

impl DepolarizingChannel {
    pub fn new(p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidParameter(format!(
                "depolarizing probability must be in [0, 1], got {p}"
            )));
        }
        Ok(DepolarizingChannel { p })
    }
}

impl KrausChannel for DepolarizingChannel {
    fn kraus_operators(&self) -> Vec<Array2<Complex64>> {
        let p = self.p;
        let i_coeff = (1.0 - p).sqrt();
        let pauli_coeff = (p / 3.0).sqrt();
        vec![
            operators::identity().mapv(|x| x * i_coeff),
            operators::pauli_x().mapv(|x| x * pauli_coeff),
            operators::pauli_y().mapv(|x| x * pauli_coeff),
            operators::pauli_z().mapv(|x| x * pauli_coeff),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amplitude_damping_is_cptp_for_any_gamma() {
        for gamma in [0.0, 0.25, 0.5, 1.0] {
            AmplitudeDampingChannel::new(gamma).unwrap().verify_cptp().unwrap();
        }
    }

    #[test]
    fn phase_damping_is_cptp_for_any_lambda() {
        for lambda in [0.0, 0.3, 1.0] {
            PhaseDampingChannel::new(lambda).unwrap().verify_cptp().unwrap();
        }
    }

    #[test]
    fn depolarizing_is_cptp_for_any_p() {
        for p in [0.0, 0.1, 1.0] {
            DepolarizingChannel::new(p).unwrap().verify_cptp().unwrap();
        }
    }

    #[test]
    fn out_of_range_parameters_are_rejected() {
        assert!(AmplitudeDampingChannel::new(-0.1).is_err());
        assert!(PhaseDampingChannel::new(1.1).is_err());
        assert!(DepolarizingChannel::new(2.0).is_err());
    }

    #[test]
    fn amplitude_damping_from_t1_matches_the_exponential_formula() {
        let t1 = 50e-6;
        let t = 10e-6;
        let channel = AmplitudeDampingChannel::from_t1(t1, t).unwrap();
        let expected = 1.0 - (-t / t1).exp();
        assert!((channel.gamma - expected).abs() < 1e-12);
        channel.verify_cptp().unwrap();
    }

    #[test]
    fn amplitude_damping_from_t1_at_zero_elapsed_time_is_noiseless() {
        let channel = AmplitudeDampingChannel::from_t1(50e-6, 0.0).unwrap();
        assert!(channel.gamma.abs() < 1e-15);
    }

    #[test]
    fn amplitude_damping_from_t1_rejects_non_positive_t1() {
        assert!(AmplitudeDampingChannel::from_t1(0.0, 1e-6).is_err());
        assert!(AmplitudeDampingChannel::from_t1(-1.0, 1e-6).is_err());
        assert!(AmplitudeDampingChannel::from_t1(50e-6, -1e-6).is_err());
    }

    #[test]
    fn phase_damping_from_t2_matches_the_exponential_formula() {
        let t2 = 70e-6;
        let t = 5e-6;
        let channel = PhaseDampingChannel::from_t2(t2, t).unwrap();
        let expected = 1.0 - (-t / t2).exp();
        assert!((channel.lambda - expected).abs() < 1e-12);
        channel.verify_cptp().unwrap();
    }

    #[test]
    fn phase_damping_from_t2_rejects_non_positive_t2() {
        assert!(PhaseDampingChannel::from_t2(0.0, 1e-6).is_err());
        assert!(PhaseDampingChannel::from_t2(70e-6, -1e-6).is_err());
    }
}
