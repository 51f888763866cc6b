//! Complex amplitude vectors backed by `ndarray`.

use std::fmt;

use ndarray::Array1;

use crate::complex::{Complex, ComplexExt, ZERO};
use crate::error::{QuantumError, Result};
use crate::matrix::{DenseMatrix, Matrix};

/// An ordered, fixed-length sequence of complex amplitudes.
///
/// Bit `b` of an index corresponds to qubit `b`. Normalization is not
/// enforced; call [`ComplexVector::normalize`] when a physical state is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexVector {
    data: Array1<Complex>,
}

impl ComplexVector {
    /// A vector of `len` zero components.
    pub fn zeros(len: usize) -> Self {
        ComplexVector {
            data: Array1::zeros(len),
        }
    }

    /// A vector with unit amplitude at `index` and zero elsewhere.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn basis(len: usize, index: usize) -> Self {
        let mut v = Self::zeros(len);
        v.data[index] = Complex::new(1.0, 0.0);
        v
    }

    pub fn from_vec(components: Vec<Complex>) -> Self {
        ComplexVector {
            data: Array1::from_vec(components),
        }
    }

    pub fn from_array(data: Array1<Complex>) -> Self {
        ComplexVector { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Component `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    pub fn component(&self, i: usize) -> Complex {
        self.data[i]
    }

    pub fn set_component(&mut self, i: usize, value: Complex) {
        self.data[i] = value;
    }

    pub fn as_array(&self) -> &Array1<Complex> {
        &self.data
    }

    pub fn as_slice(&self) -> &[Complex] {
        self.data
            .as_slice()
            .expect("ComplexVector storage is always contiguous")
    }

    pub(crate) fn as_slice_mut(&mut self) -> &mut [Complex] {
        self.data
            .as_slice_mut()
            .expect("ComplexVector storage is always contiguous")
    }

    pub fn iter(&self) -> impl Iterator<Item = &Complex> {
        self.data.iter()
    }

    pub fn into_array(self) -> Array1<Complex> {
        self.data
    }

    /// Element-wise sum.
    ///
    /// # Errors
    /// [`QuantumError::LengthMismatch`] if the lengths differ.
    pub fn add(&self, other: &ComplexVector) -> Result<ComplexVector> {
        self.check_len(other)?;
        Ok(ComplexVector {
            data: &self.data + &other.data,
        })
    }

    /// Bilinear dot product `Σ aᵢ·bᵢ` (no implicit conjugation).
    ///
    /// # Errors
    /// [`QuantumError::LengthMismatch`] if the lengths differ.
    pub fn dotprod(&self, other: &ComplexVector) -> Result<Complex> {
        self.check_len(other)?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .fold(ZERO, |acc, (a, b)| acc + a * b))
    }

    /// Multiply every component by `p`.
    pub fn scalar_multiply(&self, p: Complex) -> ComplexVector {
        ComplexVector {
            data: self.data.mapv(|a| p * a),
        }
    }

    pub fn conjugate(&self) -> ComplexVector {
        ComplexVector {
            data: self.data.mapv(|a| a.conj()),
        }
    }

    /// `sqrt(Re(v·v̄))`, the Euclidean norm.
    pub fn magnitude(&self) -> f64 {
        self.norm_sqr().sqrt()
    }

    /// `Σ|aᵢ|²`.
    pub fn norm_sqr(&self) -> f64 {
        self.data.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Scale in place to unit magnitude. A zero vector is left unchanged.
    pub fn normalize(&mut self) {
        let mag = self.magnitude();
        if mag > 0.0 {
            let factor = 1.0 / mag;
            self.data.mapv_inplace(|a| a.scalar_multiply(factor));
        }
    }

    /// Set every component to zero.
    pub fn clear(&mut self) {
        self.data.fill(ZERO);
    }

    /// Kronecker product `out[i*len(other)+j] = self[i]*other[j]`.
    ///
    /// `self` occupies the high-order qubits of the result.
    pub fn tensor_ket_product(&self, other: &ComplexVector) -> ComplexVector {
        let m = other.len();
        let mut out = Array1::zeros(self.len() * m);
        for (i, a) in self.data.iter().enumerate() {
            for (j, b) in other.data.iter().enumerate() {
                out[i * m + j] = a * b;
            }
        }
        ComplexVector { data: out }
    }

    /// Outer product `out[i][j] = self[i]*other[j]` as a dense square matrix.
    ///
    /// # Errors
    /// [`QuantumError::LengthMismatch`] if the lengths differ.
    pub fn outer_product(&self, other: &ComplexVector) -> Result<DenseMatrix> {
        self.check_len(other)?;
        let n = self.len();
        let mut out = DenseMatrix::zeros(n);
        for i in 0..n {
            for j in 0..n {
                out.set_element(i, j, self.data[i] * other.data[j]);
            }
        }
        Ok(out)
    }

    fn check_len(&self, other: &ComplexVector) -> Result<()> {
        if self.len() != other.len() {
            return Err(QuantumError::length_mismatch(self.len(), other.len()));
        }
        Ok(())
    }
}

impl From<Vec<Complex>> for ComplexVector {
    fn from(components: Vec<Complex>) -> Self {
        Self::from_vec(components)
    }
}

/// Renders `(amplitude)|bits⟩` terms, most significant qubit first.
impl fmt::Display for ComplexVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = self.len().max(1).trailing_zeros() as usize;
        for (i, a) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "({})|", a)?;
            for t in (0..bits).rev() {
                write!(f, "{}", (i >> t) & 1)?;
            }
            write!(f, "⟩")?;
        }
        Ok(())
    }
}
