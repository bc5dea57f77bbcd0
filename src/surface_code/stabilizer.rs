//! Placement metadata for a single stabilizer: its lattice position, type,
//! and Pauli support.

use crate::types::pauli::PauliString;

/// A qubit's position on the rotated lattice, plus its global index in the
/// overall circuit (data qubits first, then X-ancillas, then Z-ancillas).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QubitPosition {
    pub row: i32,
    pub col: i32,
    pub global_index: usize,
}

/// A single stabilizer generator: its ancilla's lattice position, type, and
/// the Pauli operator it measures.
#[derive(Debug, Clone, PartialEq)]
pub struct StabilizerInfo {
    pub index: usize,
    pub row: i32,
    pub col: i32,
    pub is_x_type: bool,
    pub operator: PauliString,
}

impl StabilizerInfo {
    pub fn support_qubits(&self) -> Vec<usize> {
        self.operator.support_qubits()
    }

    pub fn weight(&self) -> usize {
        self.operator.weight()
    }
}
