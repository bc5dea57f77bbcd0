//! Step-debugging execution engine: drives a [`Circuit`] one gate at a time
//! against a [`StateVector`], keeping a full reversible history so a caller
//! can step backward as cheaply as forward, and pausing at breakpoints.

mod breakpoint;

pub use breakpoint::Breakpoint;

use crate::circuit::Circuit;
use crate::error::{Error, Result};
use crate::state_vector::StateVector;

/// The engine's coarse-grained run state, mirroring a debugger's
/// run/step/pause toggle. Purely observational: it does not gate which
/// methods may be called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Run,
    Step,
    Pause,
}

/// Drives a circuit forward and backward one gate at a time, snapshotting the
/// state after every gate so stepping backward is a history lookup rather
/// than a recomputation.
///
/// Owns a value-copy of the circuit it was constructed from: further
/// mutations to the caller's original circuit do not affect a running engine.
pub struct ExecutionEngine {
    circuit: Circuit,
    state: StateVector,
    step: usize,
    history: Vec<StateVector>,
    mode: ExecutionMode,
    breakpoints: Vec<Breakpoint>,
}

impl ExecutionEngine {
    /// Builds an engine over a clone of `circuit`, with the state initialized
    /// to `|0...0>` and a single-entry history at step 0.
    pub fn new(circuit: Circuit) -> Self {
        let state = StateVector::zero(circuit.num_qubits());
        ExecutionEngine {
            circuit,
            state: state.clone(),
            step: 0,
            history: vec![state],
            mode: ExecutionMode::Pause,
            breakpoints: Vec::new(),
        }
    }

    pub fn current_state(&self) -> &StateVector {
        &self.state
    }

    pub fn history(&self) -> &[StateVector] {
        &self.history
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        self.circuit.gate_count()
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.circuit.gate_count()
    }

    /// Applies gate `step` to the current state, advances the step counter,
    /// and appends the resulting state to history. Fails with
    /// [`Error::AlreadyFinished`] if there is no next gate.
    ///
    /// History is not truncated on a prior [`Self::step_backward`] before
    /// this runs; stepping forward again from a back-stepped position
    /// overwrites `history[step..]` rather than growing it unboundedly.
    pub fn step_forward(&mut self) -> Result<()> {
        if self.is_finished() {
            return Err(Error::AlreadyFinished);
        }
        self.mode = ExecutionMode::Step;
        self.circuit.execute_step(&mut self.state, self.step)?;
        self.step += 1;
        self.history.truncate(self.step);
        self.history.push(self.state.clone());
        self.mode = ExecutionMode::Pause;
        Ok(())
    }

    /// Rewinds the step counter by one and restores the state from history.
    /// Fails with [`Error::AlreadyAtStart`] at step 0.
    pub fn step_backward(&mut self) -> Result<()> {
        if self.step == 0 {
            return Err(Error::AlreadyAtStart);
        }
        self.step -= 1;
        self.state = self.history[self.step].clone();
        Ok(())
    }

    /// Steps forward until a breakpoint matches the current step or the
    /// circuit is drained.
    pub fn run_to_breakpoint(&mut self) -> Result<()> {
        self.mode = ExecutionMode::Run;
        while !self.is_finished() && !self.is_at_breakpoint() {
            self.step_forward()?;
        }
        self.mode = ExecutionMode::Pause;
        Ok(())
    }

    /// Drains the circuit, stepping forward until finished.
    pub fn run_to_end(&mut self) -> Result<()> {
        self.mode = ExecutionMode::Run;
        while !self.is_finished() {
            self.step_forward()?;
        }
        self.mode = ExecutionMode::Pause;
        Ok(())
    }

    /// Clears history, re-initializes the state to `|0...0>`, and rewinds the
    /// step counter to 0. The breakpoint list survives a reset.
    pub fn reset(&mut self) {
        self.state = StateVector::zero(self.circuit.num_qubits());
        self.step = 0;
        self.history = vec![self.state.clone()];
        self.mode = ExecutionMode::Pause;
    }

    /// Registers an unconditional breakpoint at `gate_index`, returning its
    /// slot in the breakpoint list.
    pub fn add_breakpoint(&mut self, gate_index: usize) -> usize {
        self.breakpoints.push(Breakpoint::unconditional(gate_index));
        self.breakpoints.len() - 1
    }

    /// Registers a breakpoint at `gate_index` that only fires when
    /// `predicate` holds on the current state, returning its slot.
    pub fn add_conditional_breakpoint(
        &mut self,
        gate_index: usize,
        description: impl Into<String>,
        predicate: impl Fn(&StateVector) -> bool + 'static,
    ) -> usize {
        self.breakpoints.push(Breakpoint::conditional(gate_index, description, predicate));
        self.breakpoints.len() - 1
    }

    /// Removes the breakpoint at list slot `index` (not a gate index).
    pub fn remove_breakpoint(&mut self, index: usize) -> Result<()> {
        if index >= self.breakpoints.len() {
            return Err(Error::invalid_index(index, self.breakpoints.len()));
        }
        self.breakpoints.remove(index);
        Ok(())
    }

    /// Flips the `enabled` flag of the breakpoint at list slot `index`.
    pub fn toggle_breakpoint(&mut self, index: usize) -> Result<()> {
        let bp = self
            .breakpoints
            .get_mut(index)
            .ok_or_else(|| Error::invalid_index(index, self.breakpoints.len()))?;
        bp.enabled = !bp.enabled;
        Ok(())
    }

    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// True iff some enabled breakpoint's gate index equals the current step
    /// and its predicate, if any, holds on the current state.
    pub fn is_at_breakpoint(&self) -> bool {
        self.breakpoints.iter().any(|bp| bp.matches(self.step, &self.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pauli::Pauli;

    fn stepping_circuit() -> Circuit {
        // X(0); H(0); Z(0) on a single qubit, matching the reference
        // step/step-back scenario.
        let mut circuit = Circuit::new(1, 0);
        circuit.x(0).unwrap();
        circuit.h(0).unwrap();
        circuit.z(0).unwrap();
        circuit
    }

    #[test]
    fn stepping_through_three_gates_tracks_step_and_history() {
        let mut engine = ExecutionEngine::new(stepping_circuit());
        for _ in 0..3 {
            engine.step_forward().unwrap();
        }
        assert_eq!(engine.current_step(), 3);
        assert_eq!(engine.history().len(), 4);
        assert!(engine.is_finished());
    }

    #[test]
    fn stepping_past_the_end_fails() {
        let mut engine = ExecutionEngine::new(stepping_circuit());
        engine.run_to_end().unwrap();
        assert!(engine.step_forward().is_err());
    }

    #[test]
    fn step_backward_restores_the_prior_snapshot() {
        let mut engine = ExecutionEngine::new(stepping_circuit());
        engine.step_forward().unwrap(); // after X
        engine.step_forward().unwrap(); // after X, H
        let after_h = engine.current_state().clone();
        engine.step_forward().unwrap(); // after X, H, Z
        engine.step_backward().unwrap();
        assert_eq!(engine.current_state(), &after_h);
        assert_eq!(engine.current_step(), 2);
    }

    #[test]
    fn step_backward_at_start_fails() {
        let mut engine = ExecutionEngine::new(stepping_circuit());
        assert!(engine.step_backward().is_err());
    }

    #[test]
    fn breakpoint_matches_only_at_its_gate_index() {
        let mut engine = ExecutionEngine::new(stepping_circuit());
        engine.add_breakpoint(1);
        assert!(!engine.is_at_breakpoint());
        engine.step_forward().unwrap();
        assert!(engine.is_at_breakpoint());
        engine.step_forward().unwrap();
        assert!(!engine.is_at_breakpoint());
    }

    #[test]
    fn run_to_breakpoint_stops_exactly_there() {
        let mut engine = ExecutionEngine::new(stepping_circuit());
        engine.add_breakpoint(2);
        engine.run_to_breakpoint().unwrap();
        assert_eq!(engine.current_step(), 2);
        assert!(!engine.is_finished());
    }

    #[test]
    fn conditional_breakpoint_fires_only_when_predicate_holds() {
        let mut engine = ExecutionEngine::new(stepping_circuit());
        engine.add_conditional_breakpoint(0, "qubit flipped to one", |s: &StateVector| {
            s.expectation(0, Pauli::Z).unwrap_or(1.0) < 0.0
        });
        engine.step_forward().unwrap(); // after X: qubit is |1>
        assert!(engine.is_at_breakpoint());
    }

    #[test]
    fn toggle_and_remove_breakpoint_by_list_slot() {
        let mut engine = ExecutionEngine::new(stepping_circuit());
        let slot = engine.add_breakpoint(1);
        engine.toggle_breakpoint(slot).unwrap();
        assert!(!engine.breakpoints()[slot].enabled);
        engine.remove_breakpoint(slot).unwrap();
        assert!(engine.breakpoints().is_empty());
    }

    #[test]
    fn reset_clears_history_and_rewinds_step() {
        let mut engine = ExecutionEngine::new(stepping_circuit());
        engine.run_to_end().unwrap();
        engine.reset();
        assert_eq!(engine.current_step(), 0);
        assert_eq!(engine.history().len(), 1);
        assert!(!engine.is_finished());
    }

    #[test]
    fn forward_after_backstep_overwrites_rather_than_grows_history() {
        let mut engine = ExecutionEngine::new(stepping_circuit());
        engine.run_to_end().unwrap();
        engine.step_backward().unwrap();
        engine.step_backward().unwrap();
        engine.step_forward().unwrap();
        engine.step_forward().unwrap();
        assert_eq!(engine.history().len(), 4);
    }
}
