//! Purity, von Neumann entropy, and the Hermitian-eigenvalue helper both rely
//! on.

use ndarray::Array2;
use num_complex::Complex64;

use super::eigen::jacobi_eigenvalues;
use super::DensityMatrix;
use crate::error::Result;

/// Eigenvalues of a Hermitian matrix, computed by embedding it as a real
/// symmetric `2n x 2n` matrix `[[A, -B], [B, A]]` (where `H = A + iB`) whose
/// spectrum is the spectrum of `H`, each value duplicated. Jacobi's method
/// only handles real symmetric input, so this is the bridge from Hermitian
/// complex matrices to it.
pub(crate) fn hermitian_eigenvalues(h: &Array2<Complex64>) -> Result<Vec<f64>> {
    let n = h.nrows();
    let mut real_block = Array2::<f64>::zeros((2 * n, 2 * n));
    for i in 0..n {
        for j in 0..n {
            let a = h[[i, j]].re;
            let b = h[[i, j]].im;
            real_block[[i, j]] = a;
            real_block[[i, n + j]] = -b;
            real_block[[n + i, j]] = b;
            real_block[[n + i, n + j]] = a;
        }
    }
    let mut eigs = jacobi_eigenvalues(&real_block)?;
    eigs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    // Each eigenvalue of H appears twice in the 2n-dimensional spectrum;
    // collapse adjacent duplicate pairs back down to n values.
    Ok(eigs.into_iter().step_by(2).collect())
}

/// `Tr(rho^2)`, 1 for a pure state and `1/d` for the maximally mixed state on
/// dimension `d`.
pub fn purity(rho: &DensityMatrix) -> Result<f64> {
    let m = rho.matrix();
    let squared = m.dot(m);
    let trace: Complex64 = (0..m.nrows()).map(|i| squared[[i, i]]).sum();
    Ok(trace.re)
}

/// Von Neumann entropy `S(rho) = -Tr(rho log2 rho) = -sum_i lambda_i log2 lambda_i`
/// over the eigenvalues `lambda_i` of `rho`, with the convention `0 log2 0 = 0`.
pub fn entropy(rho: &DensityMatrix) -> Result<f64> {
    let eigenvalues = hermitian_eigenvalues(rho.matrix())?;
    let s = eigenvalues
        .into_iter()
        .map(|lambda| {
            let lambda = lambda.max(0.0);
            if lambda < crate::TOLERANCE {
                0.0
            } else {
                -lambda * lambda.log2()
            }
        })
        .sum();
    Ok(s)
}
