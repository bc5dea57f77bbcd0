//! A hand-rolled cyclic Jacobi eigensolver for real symmetric matrices.
//!
//! The crate's dependency set has no linear-algebra backend, so entropy and
//! purity diagnostics need their own eigenvalue routine. Jacobi's method
//! converges quadratically and is simple enough to validate by hand, which
//! matters more here than asymptotic speed for the small matrices (`2^n` for
//! a handful of qubits) this crate deals with.

use ndarray::Array2;

use crate::error::{Error, Result};

const MAX_SWEEPS: usize = 100;
const CONVERGENCE_TOLERANCE: f64 = 1e-12;

/// Returns the eigenvalues of a real symmetric matrix `m`, in no particular
/// order. Fails with [`Error::NumericalFailure`] if off-diagonal mass hasn't
/// collapsed below tolerance after [`MAX_SWEEPS`] sweeps.
pub fn jacobi_eigenvalues(m: &Array2<f64>) -> Result<Vec<f64>> {
    let n = m.nrows();
    if m.ncols() != n {
        return Err(Error::InvalidShape("jacobi eigensolver requires a square matrix".into()));
    }
    if n == 0 {
        return Ok(Vec::new());
    }
    let mut a = m.clone();

    for _ in 0..MAX_SWEEPS {
        let off_diag_sq: f64 = (0..n)
            .flat_map(|p| (p + 1..n).map(move |q| (p, q)))
            .map(|(p, q)| a[[p, q]] * a[[p, q]])
            .sum();
        if off_diag_sq.sqrt() < CONVERGENCE_TOLERANCE {
            return Ok((0..n).map(|i| a[[i, i]]).collect());
        }

        for p in 0..n {
            for q in (p + 1)..n {
                if a[[p, q]].abs() < 1e-300 {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * a[[p, q]]);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let t = if theta == 0.0 { 1.0 } else { t };
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                let app = a[[p, p]];
                let aqq = a[[q, q]];
                let apq = a[[p, q]];

                a[[p, p]] = c * c * app - 2.0 * s * c * apq + s * s * aqq;
                a[[q, q]] = s * s * app + 2.0 * s * c * apq + c * c * aqq;
                a[[p, q]] = 0.0;
                a[[q, p]] = 0.0;

                for k in 0..n {
                    if k != p && k != q {
                        let akp = a[[k, p]];
                        let akq = a[[k, q]];
                        a[[k, p]] = c * akp - s * akq;
                        a[[p, k]] = a[[k, p]];
                        a[[k, q]] = s * akp + c * akq;
                        a[[q, k]] = a[[k, q]];
                    }
                }
            }
        }
    }

    Err(Error::NumericalFailure(
        "Jacobi eigensolver did not converge within the sweep budget".into(),
    ))
}
