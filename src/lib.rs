//! # omniq-core
//!
//! Core simulation engine for a quantum-computing framework: dense state-vector
//! and density-matrix evolution, a Kraus-operator noise model, a stabilizer-tableau
//! Clifford simulator, a surface-code lattice with two syndrome decoders, and a
//! step-debugging execution engine with reversible history and breakpoints.
//!
//! The graphical debugger, gate-palette editor, visualizations, file I/O, and
//! circuit-to-assembly serialization are external collaborators layered on top
//! of this crate; they are out of scope here.
//!
//! # Usage Example
//!
//! ```rust
//! use omniq_core::prelude::*;
//!
//! let mut circuit = Circuit::new(2, 0);
//! circuit.h(0).unwrap();
//! circuit.cnot(0, 1).unwrap();
//!
//! let mut state = StateVector::zero(2);
//! circuit.execute_all(&mut state).unwrap();
//!
//! assert!((state.probability(0, false).unwrap() - 0.5).abs() < 1e-9);
//! ```

pub mod circuit;
pub mod clifford;
pub mod decoders;
pub mod density_matrix;
pub mod error;
pub mod exec_engine;
pub mod noise;
pub mod operators;
pub mod state_vector;
pub mod surface_code;
pub mod types;

/// Numerical tolerance shared by every invariant check in the crate:
/// normalization, Hermiticity, unit trace, PSD-ness, and CPTP completeness.
pub const TOLERANCE: f64 = 1e-10;

pub mod prelude {
    pub use crate::circuit::{Circuit, GateKind};
    pub use crate::clifford::CliffordSim;
    pub use crate::decoders::{Decoder, MwpmDecoder, UnionFindDecoder};
    pub use crate::density_matrix::DensityMatrix;
    pub use crate::error::{Error, Result};
    pub use crate::exec_engine::{Breakpoint, ExecutionEngine, ExecutionMode};
    pub use crate::noise::{NoiseModel, channels::KrausChannel};
    pub use crate::state_vector::StateVector;
    pub use crate::surface_code::SurfaceCode;
    pub use crate::types::pauli::Pauli;
}

#[cfg(test)]
pub(crate) mod test_utils;
