//! Syndrome decoders: given which stabilizers were violated, propose a set
//! of qubits to flip back to the code space.

mod mwpm;
mod union_find;

pub use mwpm::MwpmDecoder;
pub use union_find::UnionFindDecoder;

use crate::error::Result;
use crate::surface_code::SurfaceCode;
use crate::surface_code::Syndrome;

/// A syndrome decoder. `decode` mirrors the reference API (returning matched
/// stabilizer indices); [`decode_on_lattice`](Decoder::decode_on_lattice)
/// resolves those into an actual data-qubit correction chain given the
/// lattice that produced the syndrome.
pub trait Decoder {
    /// Matches violated stabilizer indices pairwise, returning them
    /// interleaved (`[a0, b0, a1, b1, ...]`) as the reference decoders do.
    fn decode(&self, syndrome: &Syndrome) -> Vec<usize>;

    fn name(&self) -> &'static str;

    fn code_distance(&self) -> usize;

    /// Updates the code distance used as the matching/clustering radius.
    fn set_code_distance(&mut self, d: usize);

    /// Decodes `syndrome` against `lattice` and returns the data qubits to
    /// flip: for each matched pair of violated stabilizers, the shortest
    /// lattice path of data qubits between them (a straight line along rows
    /// then columns), rather than the bare ancilla/stabilizer indices
    /// `decode` returns.
    fn decode_on_lattice(&self, syndrome: &Syndrome, lattice: &SurfaceCode) -> Result<Vec<usize>> {
        let matched = self.decode(syndrome);
        let x_count = lattice.x_stabilizers().len();

        let position_of = |stabilizer_index: usize| -> (i32, i32) {
            if stabilizer_index < x_count {
                let s = &lattice.x_stabilizers()[stabilizer_index];
                (s.row, s.col)
            } else {
                let s = &lattice.z_stabilizers()[stabilizer_index - x_count];
                (s.row, s.col)
            }
        };

        let mut chain = Vec::new();
        for pair in matched.chunks(2) {
            if pair.len() < 2 {
                continue;
            }
            let (r0, c0) = position_of(pair[0]);
            let (r1, c1) = position_of(pair[1]);
            chain.extend(lattice_path_data_qubits(lattice, (r0, c0), (r1, c1)));
        }
        Ok(chain)
    }
}

/// The data qubits lying on an L-shaped path between two ancilla positions:
/// walk the row coordinate to `end.0` at fixed `start.1`, then the column
/// coordinate to `end.1`, collecting every data qubit position crossed.
fn lattice_path_data_qubits(lattice: &SurfaceCode, start: (i32, i32), end: (i32, i32)) -> Vec<usize> {
    let mut path = Vec::new();
    let d = lattice.distance() as i32;

    let mut row = start.0;
    let col = start.1;
    let row_step = if end.0 >= row { 1 } else { -1 };
    while row != end.0 {
        push_if_data_qubit(lattice, row, col, d, &mut path);
        row += row_step;
    }
    push_if_data_qubit(lattice, row, col, d, &mut path);

    let mut cc = col;
    let col_step = if end.1 >= cc { 1 } else { -1 };
    while cc != end.1 {
        push_if_data_qubit(lattice, row, cc, d, &mut path);
        cc += col_step;
    }
    push_if_data_qubit(lattice, row, end.1, d, &mut path);

    path
}

fn push_if_data_qubit(lattice: &SurfaceCode, row: i32, col: i32, d: i32, path: &mut Vec<usize>) {
    if row >= 0 && row < d && col >= 0 && col < d {
        if let Some(q) = lattice.data_qubits().iter().find(|q| q.row == row && q.col == col) {
            path.push(q.global_index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_on_lattice_returns_only_in_bounds_data_qubits() {
        let lattice = SurfaceCode::new(3).unwrap();
        let mut syndrome = Syndrome::new(lattice.x_stabilizers().len() + lattice.z_stabilizers().len(), 3);
        syndrome.set(0, true).unwrap();
        if lattice.x_stabilizers().len() > 1 {
            syndrome.set(1, true).unwrap();
        }
        let decoder = MwpmDecoder::new(3);
        let chain = decoder.decode_on_lattice(&syndrome, &lattice).unwrap();
        for q in chain {
            assert!(q < lattice.num_data_qubits());
        }
    }
}
