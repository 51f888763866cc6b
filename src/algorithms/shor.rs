//! Shor factoring: quantum period finding plus classical post-processing.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{AlgorithmError, Result};
use crate::classical::{convergents, gcd, mod_pow};
use crate::modexp::ModularExponentiation;
use crate::operator::{Operator, Strategy};
use crate::qft::Qft;
use crate::register::Register;

/// Driver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShorConfig {
    /// Attempts (each drawing a fresh base) before giving up.
    pub max_attempts: usize,
    /// Strategy for the Fourier transforms.
    pub strategy: Strategy,
}

impl Default for ShorConfig {
    fn default() -> Self {
        ShorConfig {
            max_attempts: 20,
            strategy: Strategy::Bit,
        }
    }
}

/// A non-trivial factorization `number = factors[0] · factors[1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShorOutcome {
    pub number: u64,
    /// Sorted ascending.
    pub factors: [u64; 2],
    /// The base `m` whose period produced the factors.
    pub base: u64,
    pub period: u64,
    pub attempts: usize,
}

impl fmt::Display for ShorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} x {} (base {}, period {})",
            self.number, self.factors[0], self.factors[1], self.base, self.period
        )
    }
}

#[derive(Debug, Clone)]
pub struct Shor {
    number: u64,
    config: ShorConfig,
}

impl Shor {
    /// # Errors
    /// [`AlgorithmError::InvalidInput`] if `number < 3` or `number >= 2^32`.
    pub fn new(number: u64, config: ShorConfig) -> Result<Self> {
        if number < 3 {
            return Err(AlgorithmError::invalid_input(format!(
                "cannot factor {number}: need at least 3"
            )));
        }
        if number > u64::from(u32::MAX) {
            return Err(AlgorithmError::invalid_input(format!(
                "cannot factor {number}: modular arithmetic limited to 32-bit values"
            )));
        }
        Ok(Shor { number, config })
    }

    /// Qubits in the value register: `ceil(log2 n)`.
    pub fn value_bits(&self) -> usize {
        (u64::BITS - (self.number - 1).leading_zeros()) as usize
    }

    /// Qubits in the argument register, `floor(log2(n²(1+u)))` for `u ∈ [0,1)`.
    pub fn argument_bits(&self, u: f64) -> usize {
        let n = self.number as f64;
        (n * n * (1.0 + u)).log2().floor() as usize
    }

    /// Prepares `QFT|0⟩ ⊗ |1⟩`, entangles through `mˣ mod n`, transforms the
    /// argument register again and measures it.
    ///
    /// Returns the measurement and the argument register width.
    pub fn sample(&self, base: u64, rng: &mut impl Rng) -> Result<(u64, usize)> {
        let l = self.argument_bits(rng.r#gen::<f64>());
        let value_bits = self.value_bits();
        let strategy = self.config.strategy;

        let arguments = Qft::new(l)
            .with_strategy(strategy)
            .apply(&Register::new(l))?;
        let joint = ModularExponentiation::new(arguments, base, self.number)
            .apply(&Register::with_value(value_bits, 1)?)?;
        let mut transformed = Qft::tensor_identity(l, value_bits)
            .with_strategy(strategy)
            .apply(&joint)?;

        let total = l + value_bits;
        let measured = transformed.measure_range(total - l, total - 1, rng)?;
        debug!(base, l, measured, "quantum part finished");
        Ok((measured as u64, l))
    }

    /// Recovers the period of `base` from `measured / 2^l` and turns it into
    /// a factor pair, or `None` when this sample is unusable.
    pub fn post_process(&self, base: u64, measured: u64, l: usize) -> Option<(u64, [u64; 2])> {
        let n = self.number;
        let period = convergents(measured, 1 << l)
            .into_iter()
            .map(|(_, q)| q)
            .find(|&q| q > 0 && mod_pow(base, q, n) == 1);
        let Some(period) = period else {
            debug!(base, measured, "no convergent gives the period");
            return None;
        };
        if period % 2 == 1 {
            debug!(base, period, "period is odd");
            return None;
        }
        let half = mod_pow(base, period / 2, n);
        if half == 1 || half == n - 1 {
            debug!(base, period, "m^(r/2) is ±1 mod n");
            return None;
        }
        let first = gcd((half + n - 1) % n, n);
        if first == 1 || first == n {
            return None;
        }
        let second = n / first;
        Some((period, [first.min(second), first.max(second)]))
    }

    /// # Errors
    /// [`AlgorithmError::AttemptsExhausted`] if no attempt yields factors,
    /// which is always the case for a prime `number`.
    pub fn run(&self, rng: &mut impl Rng) -> Result<ShorOutcome> {
        let n = self.number;
        for attempt in 1..=self.config.max_attempts {
            let base = rng.gen_range(2..n);
            if gcd(base, n) != 1 {
                warn!(attempt, base, "base shares a factor with n, drawing again");
                continue;
            }
            let (measured, l) = self.sample(base, rng)?;
            match self.post_process(base, measured, l) {
                Some((period, factors)) => {
                    let outcome = ShorOutcome {
                        number: n,
                        factors,
                        base,
                        period,
                        attempts: attempt,
                    };
                    info!(%outcome, "Shor factoring finished");
                    return Ok(outcome);
                }
                None => warn!(attempt, base, measured, "period finding failed, running again"),
            }
        }
        Err(AlgorithmError::AttemptsExhausted {
            attempts: self.config.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_register_sizes() {
        let shor = Shor::new(15, ShorConfig::default()).unwrap();
        assert_eq!(shor.value_bits(), 4);
        // 225 ≤ n²(1+u) < 450
        assert_eq!(shor.argument_bits(0.0), 7);
        assert_eq!(shor.argument_bits(0.99), 8);
        assert_eq!(Shor::new(16, ShorConfig::default()).unwrap().value_bits(), 4);
        assert_eq!(Shor::new(17, ShorConfig::default()).unwrap().value_bits(), 5);
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            Shor::new(2, ShorConfig::default()),
            Err(AlgorithmError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_post_process() {
        let shor = Shor::new(15, ShorConfig::default()).unwrap();
        // 7 has period 4 mod 15; 64/256 = 1/4.
        assert_eq!(shor.post_process(7, 64, 8), Some((4, [3, 5])));
        // 192/256 = 3/4 also reveals the period.
        assert_eq!(shor.post_process(7, 192, 8), Some((4, [3, 5])));
        // 128/256 = 1/2: 7² = 4 mod 15, never 1 along the expansion.
        assert_eq!(shor.post_process(7, 128, 8), None);
        assert_eq!(shor.post_process(7, 0, 8), None);
        // 14 ≡ -1 has period 2 with 14^1 = n - 1.
        assert_eq!(shor.post_process(14, 128, 8), None);
    }

    #[test]
    fn test_sample_peaks_at_multiples() {
        // Period 4 divides 2^l, so only multiples of 2^l / 4 are observed.
        let shor = Shor::new(15, ShorConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..5 {
            let (measured, l) = shor.sample(7, &mut rng).unwrap();
            let step = (1u64 << l) / 4;
            assert_eq!(measured % step, 0, "measured {measured} with l = {l}");
        }
    }
}
