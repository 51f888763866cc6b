//! Scalar complex arithmetic.
//!
//! Amplitudes are [`num_complex::Complex64`] values; addition, subtraction,
//! multiplication and conjugation come from `num_complex`. This module adds the
//! few operations the simulator needs on top of it.

use num_complex::Complex64;

use crate::error::{QuantumError, Result};

/// A complex amplitude.
pub type Complex = Complex64;

/// The additive identity.
pub const ZERO: Complex = Complex::new(0.0, 0.0);

/// The multiplicative identity.
pub const ONE: Complex = Complex::new(1.0, 0.0);

/// Simulator-specific operations on [`Complex`].
pub trait ComplexExt: Sized {
    /// `cos θ + i·sin θ` (Euler's formula).
    fn from_angle(theta: f64) -> Self;

    /// Euclidean magnitude `sqrt(re² + im²)`.
    fn magnitude(&self) -> f64;

    /// Multiply both parts by a real scalar.
    fn scalar_multiply(&self, a: f64) -> Self;

    /// Raise to a non-negative integer power by repeated multiplication.
    ///
    /// # Errors
    /// [`QuantumError::InvalidExponent`] if `exp` is negative.
    fn checked_pow(&self, exp: i64) -> Result<Self>;
}

impl ComplexExt for Complex {
    fn from_angle(theta: f64) -> Self {
        Complex::cis(theta)
    }

    fn magnitude(&self) -> f64 {
        self.norm()
    }

    fn scalar_multiply(&self, a: f64) -> Self {
        self.scale(a)
    }

    fn checked_pow(&self, exp: i64) -> Result<Self> {
        if exp < 0 {
            return Err(QuantumError::InvalidExponent(exp));
        }
        let mut out = ONE;
        for _ in 0..exp {
            out *= *self;
        }
        Ok(out)
    }
}
