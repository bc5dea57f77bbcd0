//! Gate descriptors: a symbolic gate kind plus the qubits (and, for
//! measurement, the classical bit) it acts on.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{Error, Result};

/// The symbolic kind of a gate appended to a [`super::Circuit`]. Carries its
/// own parameters (rotation angles, an arbitrary controlled unitary) so a
/// circuit is a flat, replayable list of these rather than boxed closures.
#[derive(Debug, Clone, PartialEq)]
pub enum GateKind {
    H,
    X,
    Y,
    Z,
    S,
    Sdg,
    T,
    Rx(f64),
    Ry(f64),
    Rz(f64),
    Phase(f64),
    Cnot,
    Cz,
    Swap,
    /// A controlled application of an arbitrary single-qubit unitary — the
    /// case the reference implementation only special-cased for X (CNOT).
    ControlledUnitary { matrix: Array2<Complex64> },
    /// An opaque user-supplied unitary over an arbitrary-length qubit list,
    /// carrying its own descriptive name since the matrix alone isn't one.
    Custom { name: String, matrix: Array2<Complex64> },
    Measure,
}

impl GateKind {
    /// Number of qubits this gate kind acts on (not counting a classical
    /// bit). [`GateKind::Custom`] has no fixed arity — its qubit count is
    /// derived from its matrix's dimension instead; see
    /// [`GateDescriptor::new`].
    pub fn arity(&self) -> usize {
        match self {
            GateKind::H
            | GateKind::X
            | GateKind::Y
            | GateKind::Z
            | GateKind::S
            | GateKind::Sdg
            | GateKind::T
            | GateKind::Rx(_)
            | GateKind::Ry(_)
            | GateKind::Rz(_)
            | GateKind::Phase(_)
            | GateKind::Measure => 1,
            GateKind::Cnot | GateKind::Cz | GateKind::Swap | GateKind::ControlledUnitary { .. } => 2,
            GateKind::Custom { .. } => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::S => "S",
            GateKind::Sdg => "Sdg",
            GateKind::T => "T",
            GateKind::Rx(_) => "RX",
            GateKind::Ry(_) => "RY",
            GateKind::Rz(_) => "RZ",
            GateKind::Phase(_) => "PHASE",
            GateKind::Cnot => "CNOT",
            GateKind::Cz => "CZ",
            GateKind::Swap => "SWAP",
            GateKind::ControlledUnitary { .. } => "CU",
            GateKind::Custom { .. } => "CUSTOM",
            GateKind::Measure => "MEASURE",
        }
    }
}

/// One entry in a circuit: a gate kind applied to specific qubits, with an
/// optional classical bit destination for measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct GateDescriptor {
    pub kind: GateKind,
    pub qubits: Vec<usize>,
    pub classical_bit: Option<usize>,
}

impl GateDescriptor {
    pub fn new(kind: GateKind, qubits: Vec<usize>) -> Result<Self> {
        if let GateKind::Custom { matrix, .. } = &kind {
            let (r, c) = matrix.dim();
            if r != c || r == 0 || (r & (r - 1)) != 0 {
                return Err(Error::InvalidShape(format!(
                    "custom gate matrix must be square with power-of-two dimension, got {r}x{c}"
                )));
            }
            let expected = r.trailing_zeros() as usize;
            if qubits.len() != expected {
                return Err(Error::InvalidGate(format!(
                    "custom gate matrix acts on {expected} qubit(s), got {} qubit index argument(s)",
                    qubits.len()
                )));
            }
        } else if qubits.len() != kind.arity() {
            return Err(Error::InvalidGate(format!(
                "{} expects {} qubit(s), got {}",
                kind.name(),
                kind.arity(),
                qubits.len()
            )));
        }
        let mut sorted = qubits.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(Error::InvalidGate(format!("{} qubits must be distinct", kind.name())));
        }
        Ok(GateDescriptor { kind, qubits, classical_bit: None })
    }

    pub fn measurement(qubit: usize, classical_bit: usize) -> Self {
        GateDescriptor { kind: GateKind::Measure, qubits: vec![qubit], classical_bit: Some(classical_bit) }
    }

    /// A human-readable one-line description: gate name, qubits, and any
    /// rotation parameter rounded to six decimal places.
    pub fn describe(&self) -> String {
        let qubit_list = self
            .qubits
            .iter()
            .map(|q| q.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        match &self.kind {
            GateKind::Rx(t) | GateKind::Ry(t) | GateKind::Rz(t) | GateKind::Phase(t) => {
                format!("{}({:.6}) q[{}]", self.kind.name(), t, qubit_list)
            }
            GateKind::Measure => {
                format!("MEASURE q[{}] -> c[{}]", qubit_list, self.classical_bit.unwrap_or(0))
            }
            GateKind::Custom { name, .. } => format!("CUSTOM:{name} q[{qubit_list}]"),
            _ => format!("{} q[{}]", self.kind.name(), qubit_list),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_arity_is_rejected() {
        assert!(GateDescriptor::new(GateKind::H, vec![0, 1]).is_err());
        assert!(GateDescriptor::new(GateKind::Cnot, vec![0]).is_err());
    }

    #[test]
    fn duplicate_qubits_are_rejected() {
        assert!(GateDescriptor::new(GateKind::Cnot, vec![1, 1]).is_err());
    }

    #[test]
    fn describe_formats_rotation_angle_to_six_decimals() {
        let g = GateDescriptor::new(GateKind::Rx(1.0), vec![2]).unwrap();
        assert_eq!(g.describe(), "RX(1.000000) q[2]");
    }

    #[test]
    fn custom_gate_arity_is_derived_from_matrix_dimension() {
        let matrix = Array2::eye(4); // 2-qubit identity
        let kind = GateKind::Custom { name: "noop2".into(), matrix };
        assert!(GateDescriptor::new(kind.clone(), vec![0]).is_err());
        assert!(GateDescriptor::new(kind, vec![0, 1]).is_ok());
    }

    #[test]
    fn custom_gate_rejects_non_power_of_two_matrix() {
        let matrix = Array2::eye(3);
        let kind = GateKind::Custom { name: "bad".into(), matrix };
        assert!(GateDescriptor::new(kind, vec![0]).is_err());
    }
}
