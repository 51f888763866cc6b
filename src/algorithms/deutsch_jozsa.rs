//! Deutsch–Jozsa: decide whether a black-box function is constant or
//! balanced with one oracle query.
//!
//! Qubit 0 is the oracle's target; qubits `1..bits` hold the function input.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AlgorithmError, Result, hadamard_each};
use crate::error::QuantumError;
use crate::operator::{Operator, Strategy};
use crate::register::Register;

/// Black-box functions the oracle can hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleKind {
    /// `f(x) = 0`.
    ConstantZero,
    /// `f(x) = 1`.
    ConstantOne,
    /// `f(x) = 1` for the upper half of the input domain.
    BalancedMidpoint,
    /// `f(x) = 1` for even `x`.
    BalancedParity,
}

impl OracleKind {
    pub fn is_constant(self) -> bool {
        matches!(self, OracleKind::ConstantZero | OracleKind::ConstantOne)
    }
}

/// `|x, t⟩ → |x, t ⊕ f(x)⟩` with the target in qubit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeutschJozsaOracle {
    bits: usize,
    kind: OracleKind,
}

impl DeutschJozsaOracle {
    pub fn new(bits: usize, kind: OracleKind) -> Self {
        DeutschJozsaOracle { bits, kind }
    }

    pub fn kind(&self) -> OracleKind {
        self.kind
    }

    /// Classical evaluation of the hidden function on input `x`.
    pub fn evaluate(&self, x: usize) -> usize {
        match self.kind {
            OracleKind::ConstantZero => 0,
            OracleKind::ConstantOne => 1,
            OracleKind::BalancedMidpoint => usize::from(x >= 1 << self.bits.saturating_sub(2)),
            OracleKind::BalancedParity => usize::from(x % 2 == 0),
        }
    }
}

impl Operator for DeutschJozsaOracle {
    fn apply(&self, register: &Register) -> crate::error::Result<Register> {
        if register.bit_count() != self.bits {
            return Err(QuantumError::length_mismatch(
                1 << self.bits,
                register.base_count(),
            ));
        }
        let mut out = register.amplitudes().clone();
        let amps = out.as_slice_mut();
        for i in (0..amps.len()).step_by(2) {
            if self.evaluate(i / 2) == 1 {
                amps.swap(i, i + 1);
            }
        }
        Register::from_prior(register, out)
    }
}

/// The measured input register. Zero means the function is constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeutschJozsaOutcome {
    pub measurement: usize,
}

impl DeutschJozsaOutcome {
    pub fn is_constant(&self) -> bool {
        self.measurement == 0
    }
}

impl fmt::Display for DeutschJozsaOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_constant() { "constant" } else { "balanced" };
        write!(f, "The function is {}! Measurement: {}", verdict, self.measurement)
    }
}

/// Driver for a `bits`-qubit instance (one target plus `bits - 1` inputs).
#[derive(Debug, Clone)]
pub struct DeutschJozsa {
    oracle: DeutschJozsaOracle,
    strategy: Strategy,
}

impl DeutschJozsa {
    /// # Errors
    /// [`AlgorithmError::InvalidInput`] if `bits < 2`.
    pub fn new(bits: usize, kind: OracleKind) -> Result<Self> {
        if bits < 2 {
            return Err(AlgorithmError::invalid_input(format!(
                "Deutsch-Jozsa needs at least 2 qubits, got {bits}"
            )));
        }
        Ok(DeutschJozsa {
            oracle: DeutschJozsaOracle::new(bits, kind),
            strategy: Strategy::Bit,
        })
    }

    /// Strategy for the Hadamard layers.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn oracle(&self) -> &DeutschJozsaOracle {
        &self.oracle
    }

    pub fn run(&self, rng: &mut impl Rng) -> Result<DeutschJozsaOutcome> {
        let bits = self.oracle.bits;
        let register = Register::with_value(bits, 1)?;
        let register = hadamard_each(&register, 0..bits, self.strategy)?;
        let register = self.oracle.apply(&register)?;
        let mut register = hadamard_each(&register, 1..bits, self.strategy)?;
        debug!(bits, kind = ?self.oracle.kind, "oracle applied");

        let measurement = register.measure_range(1, bits - 1, rng)?;
        let outcome = DeutschJozsaOutcome { measurement };
        info!(%outcome, "Deutsch-Jozsa finished");
        Ok(outcome)
    }
}
