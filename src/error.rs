//! Error types for the simulation kernel.

use thiserror::Error;

/// Errors reported by vectors, matrices, registers and operators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantumError {
    /// A gate or measurement referenced a qubit the register does not have.
    #[error("qubit index {index} is out of range for a {bits}-qubit register")]
    BitOutOfRange { index: usize, bits: usize },

    /// A gate named the same qubit more than once.
    #[error("qubit index {index} is used more than once by the same gate")]
    DuplicateBit { index: usize },

    /// A qubit range whose start lies above its end.
    #[error("invalid qubit range {start}..={end}")]
    InvalidRange { start: usize, end: usize },

    /// Operands of incompatible dimension.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A classical value does not fit in the requested number of bits.
    #[error("value {value} cannot be represented with {bits} bits")]
    ValueOutOfRange { value: usize, bits: usize },

    /// Sampling walked every basis state without selecting one.
    #[error("measurement selected no basis state (state has no probability mass)")]
    NormalizationExhausted,

    /// Modular arithmetic with a zero modulus.
    #[error("modulus must be positive")]
    ZeroModulus,

    /// Negative integer power of a complex number.
    #[error("invalid exponent {0}: only non-negative powers are supported")]
    InvalidExponent(i64),
}

impl QuantumError {
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    pub fn bit_out_of_range(index: usize, bits: usize) -> Self {
        Self::BitOutOfRange { index, bits }
    }
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, QuantumError>;
