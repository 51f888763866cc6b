//! Grover search for a single marked basis state.

use std::f64::consts::FRAC_PI_4;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{AlgorithmError, Result, hadamard_each};
use crate::complex::Complex;
use crate::error::QuantumError;
use crate::matrix::{DenseMatrix, Matrix};
use crate::operator::{Operator, Strategy};
use crate::register::Register;
use crate::vector::ComplexVector;

/// Driver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroverConfig {
    /// `Matrix` uses the dense diffusion matrix and a directly built
    /// superposition; `Bit` and `Composite` use Hadamard layers with that
    /// gate strategy.
    pub strategy: Strategy,
    /// Full runs allowed before giving up on an unrecognized measurement.
    pub max_attempts: usize,
}

impl Default for GroverConfig {
    fn default() -> Self {
        GroverConfig {
            strategy: Strategy::Bit,
            max_attempts: 10,
        }
    }
}

/// Recognizes one answer and flips the sign of its amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroverOracle {
    bits: usize,
    answer: usize,
}

impl GroverOracle {
    /// # Errors
    /// [`QuantumError::ValueOutOfRange`] if `answer >= 2^bits`.
    pub fn new(bits: usize, answer: usize) -> crate::error::Result<Self> {
        let fits = u32::try_from(bits)
            .ok()
            .and_then(|b| 1usize.checked_shl(b))
            .is_some_and(|bases| answer < bases);
        if !fits {
            return Err(QuantumError::ValueOutOfRange {
                value: answer,
                bits,
            });
        }
        Ok(GroverOracle { bits, answer })
    }

    /// Oracle sized to the highest set bit of `answer` (at least one qubit).
    pub fn from_answer(answer: usize) -> Self {
        let bits = (usize::BITS - answer.leading_zeros()).max(1) as usize;
        GroverOracle { bits, answer }
    }

    pub fn bit_count(&self) -> usize {
        self.bits
    }

    pub fn base_count(&self) -> usize {
        1 << self.bits
    }

    pub fn recognize(&self, base: usize) -> bool {
        base == self.answer
    }

    /// The answer as a basis-state register.
    pub fn answer_register(&self) -> crate::error::Result<Register> {
        Register::with_value(self.bits, self.answer)
    }
}

impl Operator for GroverOracle {
    fn apply(&self, register: &Register) -> crate::error::Result<Register> {
        if register.bit_count() != self.bits {
            return Err(QuantumError::length_mismatch(
                self.base_count(),
                register.base_count(),
            ));
        }
        let mut out = register.clone();
        for base in (0..self.base_count()).filter(|&b| self.recognize(b)) {
            out.set_amplitude(base, -out.amplitude(base));
        }
        Ok(out)
    }
}

/// Inversion about the mean, `2|s⟩⟨s| − I` for the uniform state `|s⟩`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diffusion {
    bits: usize,
    strategy: Strategy,
}

impl Diffusion {
    pub fn new(bits: usize, strategy: Strategy) -> Self {
        Diffusion { bits, strategy }
    }

    /// Dense matrix with `2/N` off the diagonal and `2/N − 1` on it.
    pub fn matrix(&self) -> DenseMatrix {
        let n = 1usize << self.bits;
        let off = Complex::new(2.0 / n as f64, 0.0);
        let diag = Complex::new(2.0 / n as f64 - 1.0, 0.0);
        let mut m = DenseMatrix::zeros(n);
        for row in 0..n {
            for col in 0..n {
                m.set_element(row, col, if row == col { diag } else { off });
            }
        }
        m
    }
}

impl Operator for Diffusion {
    fn apply(&self, register: &Register) -> crate::error::Result<Register> {
        if register.bit_count() != self.bits {
            return Err(QuantumError::length_mismatch(
                1 << self.bits,
                register.base_count(),
            ));
        }
        match self.strategy {
            Strategy::Matrix => {
                let out = self.matrix().multiply_vector(register.amplitudes())?;
                Register::from_prior(register, out)
            }
            gates => {
                // H · (2|0⟩⟨0| − I) · H
                let mut reg = hadamard_each(register, 0..self.bits, gates)?;
                for base in 1..reg.base_count() {
                    reg.set_amplitude(base, -reg.amplitude(base));
                }
                hadamard_each(&reg, 0..self.bits, gates)
            }
        }
    }
}

/// The recognized measurement and the number of runs it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroverOutcome {
    pub answer: usize,
    pub attempts: usize,
}

impl fmt::Display for GroverOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Answer: {} (after {} attempt(s))", self.answer, self.attempts)
    }
}

#[derive(Debug, Clone)]
pub struct Grover {
    oracle: GroverOracle,
    config: GroverConfig,
}

impl Grover {
    pub fn new(oracle: GroverOracle, config: GroverConfig) -> Self {
        Grover { oracle, config }
    }

    /// `floor(π/4 · √N)`.
    pub fn iterations(&self) -> usize {
        (FRAC_PI_4 * (self.oracle.base_count() as f64).sqrt()).floor() as usize
    }

    /// The uniform superposition over all basis states.
    pub fn initial_state(&self) -> crate::error::Result<Register> {
        let bits = self.oracle.bit_count();
        match self.config.strategy {
            Strategy::Matrix => {
                let n = self.oracle.base_count();
                let amp = Complex::new(1.0 / (n as f64).sqrt(), 0.0);
                let mut v = ComplexVector::from_vec(vec![amp; n]);
                v.normalize();
                Register::from_vector(v)
            }
            gates => hadamard_each(&Register::new(bits), 0..bits, gates),
        }
    }

    /// Runs the amplification loop and measures once.
    pub fn run_once(&self, rng: &mut impl Rng) -> Result<usize> {
        let iteration = self
            .oracle
            .then(Diffusion::new(self.oracle.bit_count(), self.config.strategy));
        let mut register = self.initial_state()?;
        let steps = self.iterations();
        for step in 0..steps {
            register = iteration.apply(&register)?;
            let p = register.probabilities()[self.oracle.answer];
            debug!(step, steps, success_probability = p, "amplification step");
        }
        Ok(register.measure(rng)?)
    }

    /// Repeats [`Grover::run_once`] until the oracle recognizes the result.
    ///
    /// # Errors
    /// [`AlgorithmError::AttemptsExhausted`] after `max_attempts` misses.
    pub fn run(&self, rng: &mut impl Rng) -> Result<GroverOutcome> {
        for attempt in 1..=self.config.max_attempts {
            let measured = self.run_once(rng)?;
            if self.oracle.recognize(measured) {
                let outcome = GroverOutcome {
                    answer: measured,
                    attempts: attempt,
                };
                info!(%outcome, "Grover search finished");
                return Ok(outcome);
            }
            warn!(attempt, measured, "measurement not recognized, running again");
        }
        Err(AlgorithmError::AttemptsExhausted {
            attempts: self.config.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_oracle_range() {
        assert!(GroverOracle::new(4, 15).is_ok());
        assert_eq!(
            GroverOracle::new(4, 16),
            Err(QuantumError::ValueOutOfRange { value: 16, bits: 4 })
        );
        assert_eq!(
            GroverOracle::new(64, 3),
            Err(QuantumError::ValueOutOfRange { value: 3, bits: 64 })
        );
        assert_eq!(GroverOracle::from_answer(5).bit_count(), 3);
        assert_eq!(GroverOracle::from_answer(0).bit_count(), 1);
    }

    #[test]
    fn test_oracle_flips_answer_only() {
        let oracle = GroverOracle::new(2, 3).unwrap();
        let reg = hadamard_each(&Register::new(2), 0..2, Strategy::Bit).unwrap();
        let out = oracle.apply(&reg).unwrap();
        assert_abs_diff_eq!(out.amplitude(3).re, -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(out.amplitude(0).re, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_diffusion_strategies_agree() {
        let oracle = GroverOracle::new(3, 6).unwrap();
        let input = oracle
            .apply(&hadamard_each(&Register::new(3), 0..3, Strategy::Bit).unwrap())
            .unwrap();
        let dense = Diffusion::new(3, Strategy::Matrix).apply(&input).unwrap();
        let gates = Diffusion::new(3, Strategy::Bit).apply(&input).unwrap();
        for i in 0..8 {
            assert_abs_diff_eq!(dense.amplitude(i).re, gates.amplitude(i).re, epsilon = 1e-12);
            assert_abs_diff_eq!(dense.amplitude(i).im, gates.amplitude(i).im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_iterations() {
        let grover = Grover::new(GroverOracle::new(4, 7).unwrap(), GroverConfig::default());
        assert_eq!(grover.iterations(), 3);
        let grover = Grover::new(GroverOracle::new(10, 7).unwrap(), GroverConfig::default());
        assert_eq!(grover.iterations(), 25);
    }

    #[test]
    fn test_run_finds_answer() {
        let mut rng = StdRng::seed_from_u64(99);
        for strategy in [Strategy::Bit, Strategy::Matrix, Strategy::Composite] {
            let config = GroverConfig {
                strategy,
                max_attempts: 20,
            };
            let grover = Grover::new(GroverOracle::new(3, 5).unwrap(), config);
            assert_eq!(grover.run(&mut rng).unwrap().answer, 5);
        }
    }

    #[test]
    fn test_attempts_exhausted() {
        let config = GroverConfig {
            strategy: Strategy::Bit,
            max_attempts: 0,
        };
        let grover = Grover::new(GroverOracle::new(2, 1).unwrap(), config);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            grover.run(&mut rng),
            Err(AlgorithmError::AttemptsExhausted { attempts: 0 })
        );
    }
}
