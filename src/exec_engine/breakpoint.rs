//! Breakpoints: a gate index to pause at, plus an optional predicate over the
//! current state so a breakpoint can be conditional ("stop when qubit 2 is
//! likely to be |1>") rather than purely positional.

use crate::state_vector::StateVector;

/// A single breakpoint registered with an [`super::ExecutionEngine`].
///
/// `gate_index` is the program-counter value it fires at; the slot it
/// occupies in the engine's breakpoint list is a separate index used by
/// [`super::ExecutionEngine::remove_breakpoint`] and
/// [`super::ExecutionEngine::toggle_breakpoint`].
pub struct Breakpoint {
    pub gate_index: usize,
    pub enabled: bool,
    pub description: String,
    predicate: Option<Box<dyn Fn(&StateVector) -> bool>>,
}

impl Breakpoint {
    /// Fires unconditionally whenever the engine reaches `gate_index`.
    pub fn unconditional(gate_index: usize) -> Self {
        Breakpoint { gate_index, enabled: true, description: String::new(), predicate: None }
    }

    /// Fires at `gate_index` only when `predicate` holds on the current state.
    pub fn conditional(
        gate_index: usize,
        description: impl Into<String>,
        predicate: impl Fn(&StateVector) -> bool + 'static,
    ) -> Self {
        Breakpoint {
            gate_index,
            enabled: true,
            description: description.into(),
            predicate: Some(Box::new(predicate)),
        }
    }

    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    /// True iff this breakpoint is enabled, its gate index matches `step`,
    /// and (when present) its predicate holds on `state`.
    pub fn matches(&self, step: usize, state: &StateVector) -> bool {
        self.enabled
            && self.gate_index == step
            && self.predicate.as_ref().is_none_or(|pred| pred(state))
    }
}
