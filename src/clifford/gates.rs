//! The seven Clifford gate transforms, each updating every row of the
//! tableau in `O(n)` time.

use super::CliffordSim;
use crate::error::Result;

impl CliffordSim {
    /// H swaps the X and Z part of every row touching `qubit`, flipping sign
    /// when both were set (since `HXH = Z`, `HZH = X`, `HYH = -Y`).
    pub fn h(&mut self, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        for i in 0..2 * self.num_qubits {
            let xi = self.x[[i, qubit]];
            let zi = self.z[[i, qubit]];
            self.x[[i, qubit]] = zi;
            self.z[[i, qubit]] = xi;
            if xi == 1 && zi == 1 {
                self.r[i] ^= 1;
            }
        }
        Ok(())
    }

    /// S: X -> Y, Y -> -X, Z -> Z.
    pub fn s(&mut self, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        for i in 0..2 * self.num_qubits {
            if self.x[[i, qubit]] == 1 {
                self.z[[i, qubit]] ^= 1;
                if self.z[[i, qubit]] == 1 {
                    self.r[i] ^= 1;
                }
            }
        }
        Ok(())
    }

    /// S-dagger as three applications of S.
    pub fn sdg(&mut self, qubit: usize) -> Result<()> {
        self.s(qubit)?;
        self.s(qubit)?;
        self.s(qubit)
    }

    /// CNOT: `X_c -> X_c X_t`, `Z_t -> Z_c Z_t`.
    pub fn cnot(&mut self, control: usize, target: usize) -> Result<()> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(crate::error::Error::InvalidGate("control and target must differ".into()));
        }
        for i in 0..2 * self.num_qubits {
            let xc = self.x[[i, control]] as i32;
            let zt = self.z[[i, target]] as i32;
            let xt = self.x[[i, target]] as i32;
            let zc = self.z[[i, control]] as i32;
            let flip = xc * zt * (xt + zc + 1);
            if flip % 2 == 1 {
                self.r[i] ^= 1;
            }
            self.x[[i, target]] = ((xt + xc) % 2) as u8;
            self.z[[i, control]] = ((zc + zt) % 2) as u8;
        }
        Ok(())
    }

    /// CZ decomposed as `H(target) CNOT(control, target) H(target)`.
    pub fn cz(&mut self, control: usize, target: usize) -> Result<()> {
        self.h(target)?;
        self.cnot(control, target)?;
        self.h(target)
    }

    /// X flips the sign of every row whose Z part touches `qubit`.
    pub fn x(&mut self, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        for i in 0..2 * self.num_qubits {
            if self.z[[i, qubit]] == 1 {
                self.r[i] ^= 1;
            }
        }
        Ok(())
    }

    /// Y = iXZ: flips sign wherever exactly one of X, Z touches `qubit`.
    pub fn y(&mut self, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        for i in 0..2 * self.num_qubits {
            if self.x[[i, qubit]] ^ self.z[[i, qubit]] == 1 {
                self.r[i] ^= 1;
            }
        }
        Ok(())
    }

    /// Z flips the sign of every row whose X part touches `qubit`.
    pub fn z(&mut self, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        for i in 0..2 * self.num_qubits {
            if self.x[[i, qubit]] == 1 {
                self.r[i] ^= 1;
            }
        }
        Ok(())
    }

    /// SWAP as three CNOTs.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.cnot(a, b)?;
        self.cnot(b, a)?;
        self.cnot(a, b)
    }
}
