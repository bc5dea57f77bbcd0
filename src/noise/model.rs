//! Hardware-parameterized noise model: gate, idle, and measurement error,
//! combining the Kraus channels in [`super::channels`] into a reusable
//! "apply noise at this point in a circuit" API plus three presets.

use rand::rngs::StdRng;
use rand::Rng;

use super::channels::{AmplitudeDampingChannel, DepolarizingChannel, KrausChannel, PhaseDampingChannel};
use crate::circuit::GateKind;
use crate::density_matrix::DensityMatrix;
use crate::error::Result;

/// Physical timescales and readout quality of the simulated hardware.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardwareParams {
    /// Relaxation time T1, in seconds.
    pub t1: f64,
    /// Dephasing time T2, in seconds.
    pub t2: f64,
    pub single_qubit_gate_time: f64,
    pub two_qubit_gate_time: f64,
    pub readout_fidelity: f64,
}

impl Default for HardwareParams {
    fn default() -> Self {
        HardwareParams {
            t1: 50e-6,
            t2: 70e-6,
            single_qubit_gate_time: 50e-9,
            two_qubit_gate_time: 200e-9,
            readout_fidelity: 0.95,
        }
    }
}

/// Per-operation-class gate fidelities, 1.0 meaning perfect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateFidelities {
    pub single_qubit: f64,
    pub two_qubit: f64,
    pub measurement: f64,
}

impl Default for GateFidelities {
    fn default() -> Self {
        GateFidelities { single_qubit: 0.9999, two_qubit: 0.99, measurement: 0.95 }
    }
}

/// Combines hardware parameters and gate fidelities into gate/idle/readout
/// noise that can be injected at any point in a circuit's execution.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseModel {
    pub hardware: HardwareParams,
    pub fidelities: GateFidelities,
    pub enabled: bool,
}

impl Default for NoiseModel {
    fn default() -> Self {
        NoiseModel { hardware: HardwareParams::default(), fidelities: GateFidelities::default(), enabled: true }
    }
}

impl NoiseModel {
    /// Noise disabled entirely.
    pub fn ideal() -> Self {
        NoiseModel { enabled: false, ..Default::default() }
    }

    /// Typical superconducting-qubit parameters.
    pub fn typical() -> Self {
        NoiseModel::default()
    }

    /// A noisier device, useful for stress-testing decoders and error budgets.
    pub fn noisy() -> Self {
        NoiseModel {
            hardware: HardwareParams {
                t1: 20e-6,
                t2: 30e-6,
                single_qubit_gate_time: 100e-9,
                two_qubit_gate_time: 400e-9,
                readout_fidelity: 0.90,
            },
            fidelities: GateFidelities { single_qubit: 0.995, two_qubit: 0.95, measurement: 0.90 },
            enabled: true,
        }
    }

    /// Converts a gate fidelity to a depolarizing probability: `F = 1 - p(1 - 1/d)`
    /// for a qubit (`d = 2`) gives `p = (4/3)(1 - F)`.
    fn depolarizing_error(fidelity: f64) -> f64 {
        if fidelity >= 1.0 {
            0.0
        } else {
            (4.0 / 3.0) * (1.0 - fidelity)
        }
    }

    /// Applies depolarizing noise to `qubit` (one of the qubits touched by
    /// `kind`) followed by idle decoherence for that gate class's duration.
    /// Applies to every qubit the gate touches, unlike the reference
    /// implementation which silently no-ops outside single-qubit registers.
    pub fn apply_gate_noise(&self, rho: &mut DensityMatrix, kind: &GateKind, qubits: &[usize]) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let (fidelity, gate_time) = match kind {
            GateKind::Cnot | GateKind::Cz | GateKind::Swap | GateKind::ControlledUnitary { .. } => {
                (self.fidelities.two_qubit, self.hardware.two_qubit_gate_time)
            }
            _ => (self.fidelities.single_qubit, self.hardware.single_qubit_gate_time),
        };

        let p = Self::depolarizing_error(fidelity);
        for &qubit in qubits {
            if p > 0.0 {
                let channel = DepolarizingChannel::new(p)?;
                rho.apply_channel(&channel, qubit)?;
            }
            self.apply_idle_noise(rho, qubit, gate_time)?;
        }
        Ok(())
    }

    /// Applies T1 relaxation then T2* dephasing for `idle_time` seconds of
    /// decoherence on `qubit`.
    pub fn apply_idle_noise(&self, rho: &mut DensityMatrix, qubit: usize, idle_time: f64) -> Result<()> {
        if !self.enabled || idle_time <= 0.0 {
            return Ok(());
        }
        let gamma_t1 = 1.0 - (-idle_time / self.hardware.t1).exp();
        if gamma_t1 > 0.0 {
            let channel = AmplitudeDampingChannel::new(gamma_t1.min(1.0))?;
            rho.apply_channel(&channel, qubit)?;
        }

        let t2_star = 1.0 / (1.0 / self.hardware.t2 - 1.0 / (2.0 * self.hardware.t1));
        let lambda_t2 = 1.0 - (-idle_time / t2_star).exp();
        if lambda_t2 > 0.0 {
            let channel = PhaseDampingChannel::new(lambda_t2.min(1.0))?;
            rho.apply_channel(&channel, qubit)?;
        }
        Ok(())
    }

    /// Flips `result` with probability `1 - readout_fidelity`, using `rng` for
    /// reproducibility instead of a hidden global generator.
    pub fn apply_measurement_noise(&self, result: bool, rng: &mut StdRng) -> bool {
        if !self.enabled {
            return result;
        }
        let error_prob = 1.0 - self.hardware.readout_fidelity;
        if rng.gen::<f64>() < error_prob {
            !result
        } else {
            result
        }
    }
}
