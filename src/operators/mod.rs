//! Fixed gate matrices, parametric rotations, and the pure linear-algebra
//! helpers (tensor product, partial trace, unitarity/Hermiticity checks) that
//! every other component builds on.
//!
//! Matrices are represented as `ndarray::Array2<Complex64>`; nothing here owns
//! qubit state, so every function is free of side effects.

use ndarray::{Array2, s};
use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use crate::TOLERANCE;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// The 2×2 identity matrix.
pub fn identity() -> Array2<Complex64> {
    Array2::eye(2)
}

/// The Pauli-X matrix.
pub fn pauli_x() -> Array2<Complex64> {
    Array2::from_shape_vec((2, 2), vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)])
        .expect("fixed 2x2 shape")
}

/// The Pauli-Y matrix.
pub fn pauli_y() -> Array2<Complex64> {
    Array2::from_shape_vec((2, 2), vec![c(0.0, 0.0), c(0.0, -1.0), c(0.0, 1.0), c(0.0, 0.0)])
        .expect("fixed 2x2 shape")
}

/// The Pauli-Z matrix.
pub fn pauli_z() -> Array2<Complex64> {
    Array2::from_shape_vec((2, 2), vec![c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(-1.0, 0.0)])
        .expect("fixed 2x2 shape")
}

/// The Hadamard matrix.
pub fn hadamard() -> Array2<Complex64> {
    let h = FRAC_1_SQRT_2;
    Array2::from_shape_vec((2, 2), vec![c(h, 0.0), c(h, 0.0), c(h, 0.0), c(-h, 0.0)])
        .expect("fixed 2x2 shape")
}

/// The phase (S) gate: diag(1, i).
pub fn s_gate() -> Array2<Complex64> {
    Array2::from_shape_vec((2, 2), vec![c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 1.0)])
        .expect("fixed 2x2 shape")
}

/// The conjugate-transpose of the S gate: diag(1, -i).
pub fn sdg_gate() -> Array2<Complex64> {
    Array2::from_shape_vec((2, 2), vec![c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, -1.0)])
        .expect("fixed 2x2 shape")
}

/// The T gate: diag(1, e^{iπ/4}).
pub fn t_gate() -> Array2<Complex64> {
    let angle = std::f64::consts::FRAC_PI_4;
    Array2::from_shape_vec(
        (2, 2),
        vec![c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), Complex64::from_polar(1.0, angle)],
    )
    .expect("fixed 2x2 shape")
}

/// RX(θ) = cos(θ/2) I − i sin(θ/2) X.
pub fn rx(theta: f64) -> Array2<Complex64> {
    let (cos, sin) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    Array2::from_shape_vec(
        (2, 2),
        vec![c(cos, 0.0), c(0.0, -sin), c(0.0, -sin), c(cos, 0.0)],
    )
    .expect("fixed 2x2 shape")
}

/// RY(θ) = cos(θ/2) I − i sin(θ/2) Y.
pub fn ry(theta: f64) -> Array2<Complex64> {
    let (cos, sin) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    Array2::from_shape_vec(
        (2, 2),
        vec![c(cos, 0.0), c(-sin, 0.0), c(sin, 0.0), c(cos, 0.0)],
    )
    .expect("fixed 2x2 shape")
}

/// RZ(θ) = diag(e^{−iθ/2}, e^{iθ/2}).
pub fn rz(theta: f64) -> Array2<Complex64> {
    Array2::from_shape_vec(
        (2, 2),
        vec![
            Complex64::from_polar(1.0, -theta / 2.0),
            c(0.0, 0.0),
            c(0.0, 0.0),
            Complex64::from_polar(1.0, theta / 2.0),
        ],
    )
    .expect("fixed 2x2 shape")
}

/// PHASE(φ) = diag(1, e^{iφ}).
pub fn phase(phi: f64) -> Array2<Complex64> {
    Array2::from_shape_vec(
        (2, 2),
        vec![c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), Complex64::from_polar(1.0, phi)],
    )
    .expect("fixed 2x2 shape")
}

/// The 4×4 CNOT matrix in the basis |control, target⟩.
pub fn cnot_matrix() -> Array2<Complex64> {
    let mut m = Array2::<Complex64>::zeros((4, 4));
    m[[0, 0]] = c(1.0, 0.0);
    m[[1, 1]] = c(1.0, 0.0);
    m[[2, 3]] = c(1.0, 0.0);
    m[[3, 2]] = c(1.0, 0.0);
    m
}

/// The 4×4 SWAP matrix.
pub fn swap_matrix() -> Array2<Complex64> {
    let mut m = Array2::<Complex64>::zeros((4, 4));
    m[[0, 0]] = c(1.0, 0.0);
    m[[1, 2]] = c(1.0, 0.0);
    m[[2, 1]] = c(1.0, 0.0);
    m[[3, 3]] = c(1.0, 0.0);
    m
}

/// Embeds a single-qubit unitary `u` as a controlled gate: identity when the
/// control is |0⟩, `u` applied to the target when the control is |1⟩. The
/// resulting 4×4 matrix acts in the basis |control, target⟩.
pub fn controlled(u: &Array2<Complex64>) -> Array2<Complex64> {
    let mut m = Array2::<Complex64>::eye(4);
    m.slice_mut(s![2..4, 2..4]).assign(u);
    m
}

/// Standard Kronecker (tensor) product of two rectangular matrices, laid out
/// row-major block by block: `result[i*rb+k, j*cb+l] = a[i,j] * b[k,l]`.
pub fn tensor_product(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    let (ra, ca) = a.dim();
    let (rb, cb) = b.dim();
    let mut result = Array2::<Complex64>::zeros((ra * rb, ca * cb));
    for i in 0..ra {
        for j in 0..ca {
            let block = b.mapv(|x| x * a[[i, j]]);
            result
                .slice_mut(s![i * rb..(i + 1) * rb, j * cb..(j + 1) * cb])
                .assign(&block);
        }
    }
    result
}

/// Partial trace of a `2^n × 2^n` operator over a single qubit, folding that
/// qubit's bit position out of the basis index (unlike the naive
/// highest-order-bit assumption of the reference implementation, this works
/// for any `qubit < n`).
pub fn partial_trace_one(rho: &Array2<Complex64>, qubit: usize, n: usize) -> Array2<Complex64> {
    let dim_out = 1usize << (n - 1);
    let mut result = Array2::<Complex64>::zeros((dim_out, dim_out));
    let bit = 1usize << qubit;

    // Maps a (n-1)-bit reduced index to the full n-bit index with `qubit`'s
    // bit inserted as `value`.
    let expand = |reduced: usize, value: usize| -> usize {
        let low = reduced & (bit - 1);
        let high = (reduced & !(bit - 1)) << 1;
        high | (value << qubit) | low
    };

    for i in 0..dim_out {
        for j in 0..dim_out {
            let mut sum = Complex64::new(0.0, 0.0);
            for v in 0..2 {
                let full_i = expand(i, v);
                let full_j = expand(j, v);
                sum += rho[[full_i, full_j]];
            }
            result[[i, j]] = sum;
        }
    }
    result
}

/// `‖M M† − I‖ < τ`.
pub fn is_unitary(m: &Array2<Complex64>) -> bool {
    let (r, c) = m.dim();
    if r != c {
        return false;
    }
    let product = m.dot(&conj_transpose(m));
    let identity = Array2::<Complex64>::eye(r);
    frobenius_norm(&(product - identity)) < TOLERANCE
}

/// `‖M − M†‖ < τ`.
pub fn is_hermitian(m: &Array2<Complex64>) -> bool {
    let (r, c) = m.dim();
    if r != c {
        return false;
    }
    frobenius_norm(&(m - &conj_transpose(m))) < TOLERANCE
}

pub fn conj_transpose(m: &Array2<Complex64>) -> Array2<Complex64> {
    m.t().mapv(|x| x.conj())
}

pub fn frobenius_norm(m: &Array2<Complex64>) -> f64 {
    m.iter().map(|x| x.norm_sqr()).sum::<f64>().sqrt()
}

/// Embeds a `2^k × 2^k` operator acting on an ordered list of `k` qubits
/// (`qubits[0]` the most-significant local bit) into the full `2^n × 2^n`
/// space. Generalizes [`embed_single_qubit`] (`k=1`) to the custom/opaque
/// gates a circuit can carry, whose arity isn't known until construction.
pub fn embed_block(block: &Array2<Complex64>, qubits: &[usize], n: usize) -> Array2<Complex64> {
    let k = qubits.len();
    let dim = 1usize << n;
    let mut full = Array2::<Complex64>::zeros((dim, dim));
    let bits: Vec<usize> = qubits.iter().map(|&q| 1usize << q).collect();
    let mask = bits.iter().fold(0usize, |acc, &b| acc | b);

    for i in 0..dim {
        let rest = i & !mask;
        let mut local_in = 0usize;
        for (pos, &b) in bits.iter().enumerate() {
            if i & b != 0 {
                local_in |= 1 << (k - 1 - pos);
            }
        }
        for local_out in 0..(1 << k) {
            let amp = block[[local_out, local_in]];
            if amp == Complex64::new(0.0, 0.0) {
                continue;
            }
            let mut j = rest;
            for (pos, &b) in bits.iter().enumerate() {
                if (local_out >> (k - 1 - pos)) & 1 != 0 {
                    j |= b;
                }
            }
            full[[j, i]] = amp;
        }
    }
    full
}

/// Embeds a single-qubit gate as the full `2^n × 2^n` operator
/// `I ⊗ … ⊗ G ⊗ … ⊗ I` acting on bit `qubit` (LSB = qubit 0). Used only by the
/// dense/validation path; [`crate::state_vector`] and [`crate::density_matrix`]
/// apply single-qubit gates in place instead.
pub fn embed_single_qubit(gate: &Array2<Complex64>, qubit: usize, n: usize) -> Array2<Complex64> {
    let mut result = Array2::<Complex64>::eye(1);
    for q in (0..n).rev() {
        let block = if q == qubit { gate.clone() } else { identity() };
        result = tensor_product(&result, &block);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pauli_matrices_are_unitary_and_hermitian() {
        for m in [pauli_x(), pauli_y(), pauli_z(), hadamard(), identity()] {
            assert!(is_unitary(&m));
            assert!(is_hermitian(&m));
        }
    }

    #[test]
    fn s_gate_is_unitary_but_not_hermitian() {
        assert!(is_unitary(&s_gate()));
        assert!(!is_hermitian(&s_gate()));
    }

    #[test]
    fn rotations_reduce_to_identity_at_zero_angle() {
        let i = identity();
        for m in [rx(0.0), ry(0.0), rz(0.0), phase(0.0)] {
            assert!(frobenius_norm(&(m - &i)) < 1e-9);
        }
    }

    #[test]
    fn tensor_product_of_identities_is_identity() {
        let prod = tensor_product(&identity(), &identity());
        assert!(frobenius_norm(&(prod - Array2::eye(4))) < 1e-12);
    }

    #[test]
    fn controlled_x_matches_cnot() {
        let cx = controlled(&pauli_x());
        assert!(frobenius_norm(&(cx - cnot_matrix())) < 1e-12);
    }

    #[test]
    fn embed_block_of_a_single_qubit_matches_embed_single_qubit() {
        let x = pauli_x();
        let via_block = embed_block(&x, &[1], 3);
        let via_single = embed_single_qubit(&x, 1, 3);
        assert!(frobenius_norm(&(via_block - via_single)) < 1e-12);
    }

    #[test]
    fn embed_block_of_cnot_matches_controlled_x() {
        let cx = controlled(&pauli_x());
        // qubits = [control, target] with control as the high local bit,
        // matching the |control, target> basis `controlled` already uses.
        let embedded = embed_block(&cx, &[1, 0], 2);
        assert!(frobenius_norm(&(embedded - cx)) < 1e-12);
    }

    #[test]
    fn partial_trace_of_product_state_recovers_factor() {
        // |0>|1> as a 4x4 density matrix; tracing qubit 0 (the |0> factor)
        // should recover |1><1|.
        let mut rho = Array2::<Complex64>::zeros((4, 4));
        rho[[2, 2]] = Complex64::new(1.0, 0.0); // index 2 = 0b10 = qubit1=1,qubit0=0
        let reduced = partial_trace_one(&rho, 0, 2);
        let mut expected = Array2::<Complex64>::zeros((2, 2));
        expected[[1, 1]] = Complex64::new(1.0, 0.0);
        assert!(frobenius_norm(&(reduced - expected)) < 1e-12);
    }
}
