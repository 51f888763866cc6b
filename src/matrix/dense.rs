use std::fmt;

use ndarray::Array2;

use super::{Matrix, Storage, fmt_matrix};
use crate::complex::{Complex, ComplexExt, ONE, ZERO};

/// Matrix backend storing every element.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    values: Array2<Complex>,
    non_zero: usize,
}

impl DenseMatrix {
    /// Zero matrix of the given order.
    pub fn zeros(order: usize) -> Self {
        DenseMatrix {
            values: Array2::zeros((order, order)),
            non_zero: 0,
        }
    }

    pub fn identity(order: usize) -> Self {
        let mut m = Self::zeros(order);
        for i in 0..order {
            m.set_element(i, i, ONE);
        }
        m
    }

    /// Build from a row-major slice of `order * order` values.
    ///
    /// # Panics
    /// Panics if `vals.len() != order * order`.
    pub fn from_rows(order: usize, vals: &[Complex]) -> Self {
        assert_eq!(
            vals.len(),
            order * order,
            "expected {} values for a matrix of order {}",
            order * order,
            order
        );
        let mut m = Self::zeros(order);
        for (idx, &z) in vals.iter().enumerate() {
            m.set_element(idx / order, idx % order, z);
        }
        m
    }

    /// Wrap an existing square array.
    ///
    /// # Panics
    /// Panics if `values` is not square.
    pub fn from_array(values: Array2<Complex>) -> Self {
        assert_eq!(values.nrows(), values.ncols(), "matrix must be square");
        let non_zero = values.iter().filter(|z| **z != ZERO).count();
        DenseMatrix { values, non_zero }
    }

    pub fn as_array(&self) -> &Array2<Complex> {
        &self.values
    }

    /// Multiply every element by a complex scalar.
    pub fn scale(&self, scalar: Complex) -> DenseMatrix {
        DenseMatrix::from_array(self.values.mapv(|z| z * scalar))
    }

    /// Multiply every element by a real scalar.
    pub fn scale_real(&self, scalar: f64) -> DenseMatrix {
        DenseMatrix::from_array(self.values.mapv(|z| z.scalar_multiply(scalar)))
    }
}

impl Matrix for DenseMatrix {
    fn order(&self) -> usize {
        self.values.nrows()
    }

    fn element(&self, row: usize, col: usize) -> Complex {
        self.values[[row, col]]
    }

    fn set_element(&mut self, row: usize, col: usize, z: Complex) {
        let old = self.values[[row, col]];
        if old == ZERO && z != ZERO {
            self.non_zero += 1;
        } else if old != ZERO && z == ZERO {
            self.non_zero -= 1;
        }
        self.values[[row, col]] = z;
    }

    fn non_zero_count(&self) -> usize {
        self.non_zero
    }

    fn row_entries(&self, row: usize) -> Vec<(usize, Complex)> {
        self.values
            .row(row)
            .iter()
            .enumerate()
            .filter(|(_, z)| **z != ZERO)
            .map(|(j, z)| (j, *z))
            .collect()
    }

    fn storage(&self) -> Storage {
        Storage::Dense
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_matrix(self, f)
    }
}
