//! Shared assertion helpers for floating-point and complex-valued tests.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

const TEST_TOLERANCE: f64 = 1e-9;

pub fn assert_eq_complex(a: Complex64, b: Complex64) {
    assert!(
        (a - b).norm() < TEST_TOLERANCE,
        "expected {b:?}, got {a:?} (diff {})",
        (a - b).norm()
    );
}

pub fn assert_eq_complex_array1(a: &Array1<Complex64>, b: &Array1<Complex64>) {
    assert_eq!(a.len(), b.len(), "length mismatch: {} vs {}", a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq_complex(*x, *y);
    }
}

pub fn assert_eq_complex_array2(a: &Array2<Complex64>, b: &Array2<Complex64>) {
    assert_eq!(a.dim(), b.dim(), "shape mismatch: {:?} vs {:?}", a.dim(), b.dim());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq_complex(*x, *y);
    }
}

pub fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < TEST_TOLERANCE, "expected {b}, got {a} (diff {})", (a - b).abs());
}
