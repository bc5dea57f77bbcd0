//! Rotated-lattice surface code: data/ancilla layout, X- and Z-stabilizer
//! construction, real syndrome extraction via stabilizer expectation values,
//! and logical-state preparation.

mod stabilizer;
mod syndrome;

pub use stabilizer::{QubitPosition, StabilizerInfo};
pub use syndrome::Syndrome;

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::state_vector::StateVector;
use crate::types::pauli::{Pauli, PauliString};

/// A distance-`d` rotated surface code: `d^2` data qubits and `d^2 - 1`
/// ancilla qubits laid out on a checkerboard, with weight-4 (weight-2 on the
/// boundary) X- and Z-stabilizers. Ancillas sit at the corners of the `d x d`
/// data grid, indexed `(i, j)` for `i, j` in `0..=d`: the four lattice
/// corners carry no stabilizer, each interior corner is a weight-4 ancilla,
/// and each remaining edge corner is a weight-2 boundary ancilla of
/// whichever type (X on the top/bottom edges, Z on the left/right edges)
/// keeps the surface code's boundary condition consistent.
pub struct SurfaceCode {
    distance: usize,
    data_qubits: Vec<QubitPosition>,
    x_ancillas: Vec<QubitPosition>,
    z_ancillas: Vec<QubitPosition>,
    x_stabilizers: Vec<StabilizerInfo>,
    z_stabilizers: Vec<StabilizerInfo>,
}

impl SurfaceCode {
    /// Builds the lattice and stabilizers for an odd code distance `>= 3`.
    pub fn new(distance: usize) -> Result<Self> {
        if distance < 3 || distance % 2 == 0 {
            return Err(Error::InvalidParameter(format!(
                "surface code distance must be odd and >= 3, got {distance}"
            )));
        }

        let mut data_qubits = Vec::new();
        let mut position_to_data: HashMap<(i32, i32), usize> = HashMap::new();
        let mut global_index = 0usize;
        let d = distance as i32;

        for row in 0..d {
            for col in 0..d {
                data_qubits.push(QubitPosition { row, col, global_index });
                position_to_data.insert((row, col), data_qubits.len() - 1);
                global_index += 1;
            }
        }

        // Ancillas sit at the (d+1) x (d+1) grid of corners between data
        // qubits. The four lattice corners touch only one data qubit and
        // carry no stabilizer; each interior corner is a weight-4 ancilla
        // colored by (i+j) parity; each remaining edge corner is a weight-2
        // boundary ancilla, kept only for the parity that closes the
        // boundary (X on the top/bottom edges, Z on the left/right edges).
        let mut x_ancillas = Vec::new();
        let mut z_ancillas = Vec::new();
        for i in 0..=d {
            for j in 0..=d {
                let on_row_boundary = i == 0 || i == d;
                let on_col_boundary = j == 0 || j == d;
                if on_row_boundary && on_col_boundary {
                    continue;
                }
                let parity_even = (i + j) % 2 == 0;
                let is_x = if on_row_boundary {
                    if !parity_even {
                        continue;
                    }
                    true
                } else if on_col_boundary {
                    if parity_even {
                        continue;
                    }
                    false
                } else {
                    parity_even
                };

                let position = QubitPosition { row: i, col: j, global_index };
                if is_x {
                    x_ancillas.push(position);
                } else {
                    z_ancillas.push(position);
                }
                global_index += 1;
            }
        }

        let num_data = data_qubits.len();
        let build_stabilizers = |ancillas: &[QubitPosition], is_x_type: bool| -> Vec<StabilizerInfo> {
            ancillas
                .iter()
                .enumerate()
                .map(|(index, ancilla)| {
                    let mut symbols = vec![Pauli::I; num_data];
                    let op = if is_x_type { Pauli::X } else { Pauli::Z };
                    for (r, c) in [
                        (ancilla.row - 1, ancilla.col - 1),
                        (ancilla.row - 1, ancilla.col),
                        (ancilla.row, ancilla.col - 1),
                        (ancilla.row, ancilla.col),
                    ] {
                        if r >= 0 && r < d && c >= 0 && c < d {
                            if let Some(&data_idx) = position_to_data.get(&(r, c)) {
                                symbols[data_qubits[data_idx].global_index] = op;
                            }
                        }
                    }
                    StabilizerInfo {
                        index,
                        row: ancilla.row,
                        col: ancilla.col,
                        is_x_type,
                        operator: PauliString::from_symbols(symbols),
                    }
                })
                .collect()
        };

        let x_stabilizers = build_stabilizers(&x_ancillas, true);
        let z_stabilizers = build_stabilizers(&z_ancillas, false);

        Ok(SurfaceCode { distance, data_qubits, x_ancillas, z_ancillas, x_stabilizers, z_stabilizers })
    }

    pub fn distance(&self) -> usize {
        self.distance
    }

    pub fn num_data_qubits(&self) -> usize {
        self.data_qubits.len()
    }

    pub fn num_ancilla_qubits(&self) -> usize {
        self.x_ancillas.len() + self.z_ancillas.len()
    }

    pub fn data_qubits(&self) -> &[QubitPosition] {
        &self.data_qubits
    }

    pub fn x_ancilla_qubits(&self) -> &[QubitPosition] {
        &self.x_ancillas
    }

    pub fn z_ancilla_qubits(&self) -> &[QubitPosition] {
        &self.z_ancillas
    }

    pub fn x_stabilizers(&self) -> &[StabilizerInfo] {
        &self.x_stabilizers
    }

    pub fn z_stabilizers(&self) -> &[StabilizerInfo] {
        &self.z_stabilizers
    }

    /// Data qubits a stabilizer acts on non-trivially.
    pub fn stabilizer_support(&self, stabilizer_index: usize, is_x_type: bool) -> Result<Vec<usize>> {
        let list = if is_x_type { &self.x_stabilizers } else { &self.z_stabilizers };
        list.get(stabilizer_index)
            .map(|s| s.support_qubits())
            .ok_or_else(|| Error::invalid_index(stabilizer_index, list.len()))
    }

    /// Measures every stabilizer's expectation value on `state` (the data
    /// qubit register) and returns the resulting syndrome: a stabilizer is
    /// violated when its expectation is negative. Unlike the reference
    /// implementation, which returned a placeholder all-satisfied syndrome,
    /// this reads the actual state.
    pub fn measure_syndromes(&self, state: &StateVector) -> Result<Syndrome> {
        if state.num_qubits() != self.num_data_qubits() {
            return Err(Error::InvalidShape(format!(
                "state has {} qubits, expected {} data qubits",
                state.num_qubits(),
                self.num_data_qubits()
            )));
        }
        let mut syndrome = Syndrome::new(self.x_stabilizers.len() + self.z_stabilizers.len(), self.distance);
        for (i, stabilizer) in self.x_stabilizers.iter().chain(self.z_stabilizers.iter()).enumerate() {
            let expectation = state.pauli_string_expectation(&stabilizer.operator)?;
            syndrome.set(i, expectation < 0.0)?;
        }
        Ok(syndrome)
    }

    /// Flips the data qubits named in `error_chain` — the correction derived
    /// from a decoded syndrome.
    pub fn apply_correction(&self, error_chain: &[usize], state: &mut StateVector) -> Result<()> {
        for &qubit in error_chain {
            state.x(qubit)?;
        }
        Ok(())
    }

    /// The logical `|0>` state: all data qubits in `|0>`.
    pub fn prepare_logical_zero(&self) -> StateVector {
        StateVector::zero(self.num_data_qubits())
    }

    /// The logical `|+>` state: every data qubit Hadamard'd into `|+>`.
    pub fn prepare_logical_plus(&self) -> StateVector {
        let mut state = StateVector::zero(self.num_data_qubits());
        for q in 0..self.num_data_qubits() {
            state.h(q).expect("qubit index within range by construction");
        }
        state
    }

    /// True iff every Z-stabilizer is satisfied (the state is in the `|0>`
    /// logical code space, up to stabilizer measurement).
    pub fn is_logical_zero(&self, state: &StateVector) -> Result<bool> {
        for stabilizer in &self.z_stabilizers {
            if state.pauli_string_expectation(&stabilizer.operator)? < 0.0 {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_three_has_nine_data_and_eight_ancilla_qubits() {
        let code = SurfaceCode::new(3).unwrap();
        assert_eq!(code.num_data_qubits(), 9);
        assert_eq!(code.num_ancilla_qubits(), 8);
    }

    #[test]
    fn even_distance_is_rejected() {
        assert!(SurfaceCode::new(4).is_err());
    }

    #[test]
    fn logical_zero_has_no_violated_z_stabilizers() {
        let code = SurfaceCode::new(3).unwrap();
        let state = code.prepare_logical_zero();
        let syndrome = code.measure_syndromes(&state).unwrap();
        let z_start = code.x_stabilizers().len();
        for i in z_start..syndrome.size() {
            assert!(!syndrome.get(i).unwrap());
        }
        assert!(code.is_logical_zero(&state).unwrap());
    }

    #[test]
    fn single_bit_flip_violates_adjacent_z_stabilizers() {
        let code = SurfaceCode::new(3).unwrap();
        let mut state = code.prepare_logical_zero();
        state.x(4).unwrap(); // center data qubit
        let syndrome = code.measure_syndromes(&state).unwrap();
        assert!(syndrome.count_violations() > 0);
    }

    #[test]
    fn distance_three_has_both_boundary_and_bulk_stabilizer_weights() {
        let code = SurfaceCode::new(3).unwrap();
        let weights: Vec<usize> = code
            .x_stabilizers()
            .iter()
            .chain(code.z_stabilizers())
            .map(|s| s.weight())
            .collect();
        assert!(weights.iter().any(|&w| w == 2), "expected a weight-2 boundary stabilizer");
        assert!(weights.iter().any(|&w| w == 4), "expected a weight-4 bulk stabilizer");
        assert!(weights.iter().all(|&w| w == 2 || w == 4));
    }
}
