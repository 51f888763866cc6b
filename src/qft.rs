//! Discrete Fourier transform over a block of high-order qubits.

use std::f64::consts::PI;

use crate::complex::{Complex, ComplexExt, ZERO};
use crate::error::{QuantumError, Result};
use crate::gate::Gate;
use crate::instruct::instruct_gate;
use crate::matrix::{DenseMatrix, DynMatrix, Matrix, identity};
use crate::operator::{Operator, Strategy};
use crate::register::Register;
use crate::vector::ComplexVector;

/// `F ⊗ I(2^low_bits)` where `F[i][j] = ω^(ij)/√N`, `ω = e^(2πi/N)`,
/// `N = 2^bits`.
///
/// The transform acts on the top `bits` qubits of a register with
/// `bits + low_bits` qubits; the low qubits are left alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Qft {
    bits: usize,
    low_bits: usize,
    strategy: Strategy,
}

impl Qft {
    /// Transform over a whole `bits`-qubit register.
    pub fn new(bits: usize) -> Self {
        Qft {
            bits,
            low_bits: 0,
            strategy: Strategy::Bit,
        }
    }

    /// Transform over the top `bits` qubits, identity on the lowest `low_bits`.
    pub fn tensor_identity(bits: usize, low_bits: usize) -> Self {
        Qft {
            bits,
            low_bits,
            strategy: Strategy::Bit,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    /// The `2^bits`-order transform matrix.
    pub fn matrix(&self) -> DenseMatrix {
        let n = 1usize << self.bits;
        let scale = 1.0 / (n as f64).sqrt();
        let mut m = DenseMatrix::zeros(n);
        for i in 0..n {
            for j in 0..n {
                let angle = 2.0 * PI * ((i * j) % n) as f64 / n as f64;
                m.set_element(i, j, Complex::from_angle(angle).scalar_multiply(scale));
            }
        }
        m
    }

    /// The transform embedded over the whole register: `F ⊗ I`.
    pub fn full_matrix(&self) -> DynMatrix {
        self.matrix().tensor_product(&identity(1 << self.low_bits))
    }

    /// Hadamards and controlled phases followed by the bit-reversal swaps.
    pub fn circuit(&self) -> Vec<Gate> {
        let low = self.low_bits;
        let mut gates = Vec::new();
        for j in (0..self.bits).rev() {
            gates.push(Gate::Hadamard(low + j));
            for m in (0..j).rev() {
                gates.push(Gate::ControlledPhase {
                    control: low + m,
                    target: low + j,
                    theta: 2.0 * PI / (1u64 << (j - m + 1)) as f64,
                });
            }
        }
        for i in 0..self.bits / 2 {
            gates.push(Gate::Swap(low + i, low + self.bits - 1 - i));
        }
        gates
    }

    /// Dense block multiply: `out[x·M + y] = Σ F[x][x'] · in[x'·M + y]`.
    fn apply_blocks(&self, input: &ComplexVector) -> ComplexVector {
        let f = self.matrix();
        let n = f.order();
        let m = 1usize << self.low_bits;
        let src = input.as_slice();
        let mut out = vec![ZERO; n * m];
        for x in 0..n {
            for (xp, a) in f.row_entries(x) {
                for y in 0..m {
                    out[x * m + y] += a * src[xp * m + y];
                }
            }
        }
        ComplexVector::from_vec(out)
    }
}

impl Operator for Qft {
    fn apply(&self, register: &Register) -> Result<Register> {
        let total = self.bits + self.low_bits;
        if register.bit_count() != total {
            return Err(QuantumError::length_mismatch(1 << total, register.base_count()));
        }
        let amplitudes = match self.strategy {
            Strategy::Bit => self.apply_blocks(register.amplitudes()),
            Strategy::Matrix => self.full_matrix().multiply_vector(register.amplitudes())?,
            Strategy::Composite => {
                let mut out = register.amplitudes().clone();
                for g in self.circuit() {
                    instruct_gate(out.as_slice_mut(), &g);
                }
                out
            }
        };
        Register::from_prior(register, amplitudes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_matrix_is_unitary() {
        let f = Qft::new(3).matrix();
        let mut adjoint = DenseMatrix::zeros(8);
        for i in 0..8 {
            for j in 0..8 {
                adjoint.set_element(i, j, f.element(j, i).conj());
            }
        }
        let product = f.multiply(&adjoint).unwrap();
        assert!(product.approx_eq(&DenseMatrix::identity(8), 1e-10));
    }

    #[test]
    fn test_zero_state_to_uniform() {
        let out = Qft::new(4).apply(&Register::new(4)).unwrap();
        for p in out.probabilities() {
            assert_abs_diff_eq!(p, 1.0 / 16.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_strategies_agree() {
        let input = Qft::new(3)
            .apply(&Register::with_value(3, 5).unwrap())
            .unwrap()
            .combine(&Register::with_value(2, 1).unwrap());
        let reference = Qft::tensor_identity(3, 2)
            .with_strategy(Strategy::Matrix)
            .apply(&input)
            .unwrap();
        for strategy in [Strategy::Bit, Strategy::Composite] {
            let out = Qft::tensor_identity(3, 2)
                .with_strategy(strategy)
                .apply(&input)
                .unwrap();
            for i in 0..32 {
                assert_abs_diff_eq!(out.amplitude(i).re, reference.amplitude(i).re, epsilon = 1e-10);
                assert_abs_diff_eq!(out.amplitude(i).im, reference.amplitude(i).im, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_size_mismatch() {
        let err = Qft::tensor_identity(2, 1).apply(&Register::new(2));
        assert_eq!(err, Err(QuantumError::length_mismatch(8, 4)));
    }
}
