//! Measurement in the computational basis.
//!
//! Every measurement draws from a caller-supplied [`Rng`] and collapses the
//! register in place. Collapse is the only operation that mutates amplitudes
//! of an existing register.

use rand::Rng;
use tracing::trace;

use crate::complex::{ComplexExt, ZERO};
use crate::error::{QuantumError, Result};
use crate::register::Register;

impl Register {
    /// Measures every qubit and collapses to the sampled basis state.
    ///
    /// The register is normalized first. A uniform sample `u` is scaled by the
    /// total probability mass and basis states are walked in index order until
    /// the cumulative `|amplitude|²` exceeds it.
    ///
    /// # Errors
    /// [`QuantumError::NormalizationExhausted`] if no basis state is selected,
    /// which only happens for a zero or NaN state.
    ///
    /// # Example
    /// ```
    /// use qsim_rs::Register;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    /// let mut reg = Register::with_value(3, 5).unwrap();
    /// assert_eq!(reg.measure(&mut rng).unwrap(), 5);
    /// ```
    pub fn measure(&mut self, rng: &mut impl Rng) -> Result<usize> {
        self.normalize();
        let total = self.amplitudes().norm_sqr();
        let threshold = rng.r#gen::<f64>() * total;

        let mut cumsum = 0.0;
        let mut hit = None;
        for (i, a) in self.amplitudes().iter().enumerate() {
            cumsum += a.norm_sqr();
            if cumsum > threshold {
                hit = Some(i);
                break;
            }
        }
        let base = hit.ok_or(QuantumError::NormalizationExhausted)?;
        self.collapse_to_base(base);
        trace!(bits = self.bit_count(), outcome = base, "measured register");
        Ok(base)
    }

    /// Measures qubit `bit` alone and returns 0 or 1.
    ///
    /// Amplitudes inconsistent with the outcome are zeroed and the rest are
    /// renormalized.
    ///
    /// # Errors
    /// [`QuantumError::BitOutOfRange`] if `bit >= bit_count()`;
    /// [`QuantumError::NormalizationExhausted`] for a zero or NaN state.
    pub fn measure_bit(&mut self, bit: usize, rng: &mut impl Rng) -> Result<usize> {
        self.check_bit(bit)?;
        let total = self.amplitudes().norm_sqr();
        if !(total > 0.0) {
            return Err(QuantumError::NormalizationExhausted);
        }

        let block = 1usize << bit;
        let stride = block << 1;
        let amps = self.amplitudes().as_slice();
        let mut zero_mass = 0.0;
        for start in (0..amps.len()).step_by(stride) {
            for a in &amps[start..start + block] {
                zero_mass += a.norm_sqr();
            }
        }

        let outcome = if rng.r#gen::<f64>() * total < zero_mass { 0 } else { 1 };
        self.collapse_bit(bit, outcome);
        trace!(bit, outcome, p0 = zero_mass / total, "measured qubit");
        Ok(outcome)
    }

    /// Measures the inclusive qubit range `start..=end` one qubit at a time.
    ///
    /// Qubit `start` becomes the least significant bit of the result.
    ///
    /// # Errors
    /// [`QuantumError::InvalidRange`] if `start > end`;
    /// [`QuantumError::BitOutOfRange`] if `end >= bit_count()`.
    pub fn measure_range(
        &mut self,
        start: usize,
        end: usize,
        rng: &mut impl Rng,
    ) -> Result<usize> {
        if start > end {
            return Err(QuantumError::InvalidRange { start, end });
        }
        self.check_bit(end)?;

        let mut value = 0;
        for bit in (start..=end).rev() {
            value = (value << 1) | self.measure_bit(bit, rng)?;
        }
        trace!(start, end, value, "measured qubit range");
        Ok(value)
    }

    /// Collapses to the single basis state `base`.
    fn collapse_to_base(&mut self, base: usize) {
        let amps = self.amplitudes_mut();
        amps.clear();
        amps.set_component(base, crate::complex::ONE);
    }

    /// Zeroes every amplitude whose qubit `bit` differs from `value`, then
    /// renormalizes what remains.
    fn collapse_bit(&mut self, bit: usize, value: usize) {
        let mut kept = 0.0;
        for (i, a) in self.amplitudes_mut().as_slice_mut().iter_mut().enumerate() {
            if (i >> bit) & 1 == value {
                kept += a.norm_sqr();
            } else {
                *a = ZERO;
            }
        }
        if kept > 0.0 {
            let factor = 1.0 / kept.sqrt();
            for a in self.amplitudes_mut().as_slice_mut() {
                *a = a.scalar_multiply(factor);
            }
        }
    }
}
