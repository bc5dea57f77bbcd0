//! Crate-wide error taxonomy.
//!
//! Every public operation either succeeds and establishes its post-conditions,
//! or fails with one of these variants and leaves the receiver unchanged.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A qubit, classical-bit, stabilizer, gate, or step index fell outside `[0, size)`.
    #[error("index {index} out of bounds for size {size}")]
    InvalidIndex { index: usize, size: usize },

    /// A gate descriptor failed validation: duplicate qubits, wrong arity, missing
    /// parameter, or an unrecognized kind name.
    #[error("invalid gate: {0}")]
    InvalidGate(String),

    /// An amplitude/matrix size was not a power of two, or a rectangular matrix
    /// was supplied where a square one was required.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// An observable tag was not one of X, Y, Z.
    #[error("unknown observable {0:?}, expected one of X, Y, Z")]
    UnknownObservable(String),

    /// A physical parameter (γ, λ, p, a fidelity, a time, a code distance) was
    /// outside its legal range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A state's norm fell below the numerical tolerance at a point requiring
    /// renormalization.
    #[error("state is not normalized (norm below tolerance)")]
    NotNormalized,

    /// The execution engine was stepped backward while already at the initial state.
    #[error("already at the initial state, cannot step backward")]
    AlreadyAtStart,

    /// The execution engine was stepped forward while already past its last gate.
    #[error("execution already finished, cannot step forward")]
    AlreadyFinished,

    /// A supplied Kraus channel failed the completeness relation Σ E_k† E_k = I.
    #[error("channel is not CPTP: ‖Σ Eₖ†Eₖ − I‖ = {residual} exceeds tolerance")]
    CPTPViolation { residual: f64 },

    /// An internal numerical routine (e.g. the eigensolver backing entropy) did
    /// not converge.
    #[error("numerical routine failed to converge: {0}")]
    NumericalFailure(String),
}

impl Error {
    pub(crate) fn invalid_index(index: usize, size: usize) -> Self {
        Error::InvalidIndex { index, size }
    }
}
