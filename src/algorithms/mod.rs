//! Textbook algorithms driven through the simulation kernel.
//!
//! Drivers only use the public [`Register`] and [`Operator`] contracts. Each
//! one takes its randomness from the caller and reports failures as
//! [`AlgorithmError`].

pub mod deutsch_jozsa;
pub mod grover;
pub mod shor;

use thiserror::Error;

use crate::error::QuantumError;
use crate::gate::Gate;
use crate::operator::{GateOperator, Operator, Strategy};
use crate::register::Register;

pub use deutsch_jozsa::{DeutschJozsa, DeutschJozsaOracle, DeutschJozsaOutcome, OracleKind};
pub use grover::{Diffusion, Grover, GroverConfig, GroverOracle, GroverOutcome};
pub use shor::{Shor, ShorConfig, ShorOutcome};

/// Errors reported by algorithm drivers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgorithmError {
    #[error("kernel error: {0}")]
    Kernel(#[from] QuantumError),

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Every allowed attempt ended without a usable result.
    #[error("no result after {attempts} attempts")]
    AttemptsExhausted { attempts: usize },
}

impl AlgorithmError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Hadamard on each qubit in `bits`, in order, with the given strategy.
pub(crate) fn hadamard_each(
    register: &Register,
    bits: impl IntoIterator<Item = usize>,
    strategy: Strategy,
) -> std::result::Result<Register, QuantumError> {
    bits.into_iter().try_fold(register.clone(), |reg, b| {
        GateOperator::new(Gate::Hadamard(b), strategy).apply(&reg)
    })
}
