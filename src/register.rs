//! Qubit registers: a bit count and its `2^n` amplitudes.

use std::fmt;

use crate::complex::Complex;
use crate::error::{QuantumError, Result};
use crate::vector::ComplexVector;

/// A register of qubits: a bit count `n` and `2^n` amplitudes.
///
/// The bit count is fixed at construction. Amplitudes change in place only
/// through [`Register::set_amplitude`] and measurement collapse; operators
/// produce new registers.
#[derive(Debug, Clone, PartialEq)]
pub struct Register {
    bits: usize,
    amplitudes: ComplexVector,
}

impl Register {
    /// Creates `|0…0⟩` on `bits` qubits.
    ///
    /// # Panics
    /// If `2^bits` does not fit in `usize`.
    pub fn new(bits: usize) -> Self {
        Register {
            bits,
            amplitudes: ComplexVector::basis(1 << bits, 0),
        }
    }

    /// Creates a register from an amplitude vector of length `2^n`.
    ///
    /// # Errors
    /// [`QuantumError::LengthMismatch`] if the length is not a power of two.
    pub fn from_vector(amplitudes: ComplexVector) -> Result<Self> {
        let len = amplitudes.len();
        if !len.is_power_of_two() {
            return Err(QuantumError::length_mismatch(len.next_power_of_two(), len));
        }
        Ok(Register {
            bits: len.trailing_zeros() as usize,
            amplitudes,
        })
    }

    /// Creates the basis state `|value⟩` on `bits` qubits.
    ///
    /// # Errors
    /// [`QuantumError::ValueOutOfRange`] if `value >= 2^bits`.
    pub fn with_value(bits: usize, value: usize) -> Result<Self> {
        let bases = u32::try_from(bits)
            .ok()
            .and_then(|b| 1usize.checked_shl(b))
            .filter(|&bases| value < bases)
            .ok_or(QuantumError::ValueOutOfRange { value, bits })?;
        Ok(Register {
            bits,
            amplitudes: ComplexVector::basis(bases, value),
        })
    }

    /// Pairs the bit count of `prior` with a freshly transformed vector.
    ///
    /// # Errors
    /// [`QuantumError::LengthMismatch`] if `amplitudes` does not have
    /// `prior.base_count()` components.
    pub fn from_prior(prior: &Register, amplitudes: ComplexVector) -> Result<Self> {
        if amplitudes.len() != prior.base_count() {
            return Err(QuantumError::length_mismatch(
                prior.base_count(),
                amplitudes.len(),
            ));
        }
        Ok(Register {
            bits: prior.bits,
            amplitudes,
        })
    }

    pub fn bit_count(&self) -> usize {
        self.bits
    }

    /// Number of basis states, `2^bit_count`.
    pub fn base_count(&self) -> usize {
        1 << self.bits
    }

    /// Amplitude of basis state `base`.
    ///
    /// # Panics
    /// Panics if `base >= base_count()`.
    pub fn amplitude(&self, base: usize) -> Complex {
        self.amplitudes.component(base)
    }

    /// # Panics
    /// Panics if `base >= base_count()`.
    pub fn set_amplitude(&mut self, base: usize, amplitude: Complex) {
        self.amplitudes.set_component(base, amplitude);
    }

    pub fn amplitudes(&self) -> &ComplexVector {
        &self.amplitudes
    }

    pub fn into_amplitudes(self) -> ComplexVector {
        self.amplitudes
    }

    /// `|amplitude|²` for every basis state (not renormalized).
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// L2 norm of the amplitude vector.
    pub fn norm(&self) -> f64 {
        self.amplitudes.magnitude()
    }

    pub fn normalize(&mut self) {
        self.amplitudes.normalize();
    }

    /// Joint register `self ⊗ other`; `self` holds the high-order qubits.
    pub fn combine(&self, other: &Register) -> Register {
        Register {
            bits: self.bits + other.bits,
            amplitudes: self.amplitudes.tensor_ket_product(&other.amplitudes),
        }
    }

    /// Fails with [`QuantumError::BitOutOfRange`] if `bit` is not a qubit of
    /// this register.
    pub fn check_bit(&self, bit: usize) -> Result<()> {
        if bit >= self.bits {
            return Err(QuantumError::bit_out_of_range(bit, self.bits));
        }
        Ok(())
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut ComplexVector {
        &mut self.amplitudes
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits: {} Data: {}", self.bits, self.amplitudes)
    }
}
