//! Square complex matrices over basis states.
//!
//! Two interchangeable backends implement [`Matrix`]:
//!
//! - [`DenseMatrix`] stores every element and tracks a running non-zero count.
//! - [`SparseMatrix`] stores only non-zero elements keyed by `row * order + col`.
//!
//! Products allocate their result through [`select_storage`], a pure function
//! of the operands' non-zero counts and the result order. The choice affects
//! memory only; the logical result is the same for either backend.

mod dense;
mod sparse;

use std::fmt;

use crate::complex::{Complex, ZERO};
use crate::error::{QuantumError, Result};
use crate::vector::ComplexVector;

pub use dense::DenseMatrix;
pub use sparse::SparseMatrix;

/// Storage backend tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Dense,
    Sparse,
}

impl Storage {
    /// A zero matrix of `order` with this backend.
    pub fn zeros(self, order: usize) -> DynMatrix {
        match self {
            Storage::Dense => DynMatrix::Dense(DenseMatrix::zeros(order)),
            Storage::Sparse => DynMatrix::Sparse(SparseMatrix::zeros(order)),
        }
    }

    /// Build a matrix of `order` from `(row, col, value)` entries.
    ///
    /// Entries for the same position overwrite each other; zero values are
    /// not stored by the sparse backend.
    pub fn from_entries<I>(self, order: usize, entries: I) -> DynMatrix
    where
        I: IntoIterator<Item = (usize, usize, Complex)>,
    {
        match self {
            Storage::Dense => {
                let mut m = DenseMatrix::zeros(order);
                for (r, c, z) in entries {
                    m.set_element(r, c, z);
                }
                DynMatrix::Dense(m)
            }
            Storage::Sparse => DynMatrix::Sparse(SparseMatrix::from_entries(order, entries)),
        }
    }
}

/// Choose the backend for the product of two matrices.
///
/// The non-zero count of the result is estimated as `nnz_a * nnz_b`; if that
/// exceeds half of `order²` the result is dense, otherwise sparse.
pub fn select_storage(nnz_a: usize, nnz_b: usize, order: usize) -> Storage {
    let estimate = nnz_a.saturating_mul(nnz_b);
    if estimate > order.saturating_mul(order) / 2 {
        Storage::Dense
    } else {
        Storage::Sparse
    }
}

/// Identity matrix of dimension `d` (sparse).
pub fn identity(d: usize) -> SparseMatrix {
    SparseMatrix::identity(d)
}

/// Linear operator over basis states.
pub trait Matrix: fmt::Debug {
    fn order(&self) -> usize;

    /// Element at `(row, col)`; absent elements read as zero.
    ///
    /// # Panics
    /// May panic if `row` or `col` is `>= order`.
    fn element(&self, row: usize, col: usize) -> Complex;

    /// Write `z` at `(row, col)`.
    fn set_element(&mut self, row: usize, col: usize, z: Complex);

    fn non_zero_count(&self) -> usize;

    /// Non-zero `(col, value)` pairs of `row`, ascending by column.
    fn row_entries(&self, row: usize) -> Vec<(usize, Complex)>;

    fn storage(&self) -> Storage;

    /// Matrix-vector product.
    ///
    /// # Errors
    /// [`QuantumError::LengthMismatch`] if `v.len() != order`.
    fn multiply_vector(&self, v: &ComplexVector) -> Result<ComplexVector> {
        let n = self.order();
        if v.len() != n {
            return Err(QuantumError::length_mismatch(n, v.len()));
        }
        let out: Vec<Complex> = (0..n)
            .map(|i| {
                self.row_entries(i)
                    .into_iter()
                    .fold(ZERO, |acc, (j, a)| acc + a * v.component(j))
            })
            .collect();
        Ok(ComplexVector::from_vec(out))
    }

    /// Matrix product `self · other`.
    ///
    /// # Errors
    /// [`QuantumError::LengthMismatch`] if the orders differ.
    fn multiply(&self, other: &dyn Matrix) -> Result<DynMatrix> {
        let n = self.order();
        if other.order() != n {
            return Err(QuantumError::length_mismatch(n, other.order()));
        }
        let storage = select_storage(self.non_zero_count(), other.non_zero_count(), n);

        let mut entries = Vec::new();
        let mut row_acc = vec![ZERO; n];
        for i in 0..n {
            for (r, a) in self.row_entries(i) {
                for (j, b) in other.row_entries(r) {
                    row_acc[j] += a * b;
                }
            }
            for (j, z) in row_acc.iter_mut().enumerate() {
                if *z != ZERO {
                    entries.push((i, j, *z));
                    *z = ZERO;
                }
            }
        }
        Ok(storage.from_entries(n, entries))
    }

    /// Kronecker product `self ⊗ other`:
    /// `out[ord(B)*i + k][ord(B)*j + l] = A[i][j] * B[k][l]`.
    fn tensor_product(&self, other: &dyn Matrix) -> DynMatrix {
        let na = self.order();
        let nb = other.order();
        let order = na * nb;
        let storage = select_storage(self.non_zero_count(), other.non_zero_count(), order);

        let b_rows: Vec<Vec<(usize, Complex)>> = (0..nb).map(|k| other.row_entries(k)).collect();
        let mut entries = Vec::with_capacity(self.non_zero_count() * other.non_zero_count());
        for i in 0..na {
            let a_row = self.row_entries(i);
            for (k, b_row) in b_rows.iter().enumerate() {
                for &(j, a) in &a_row {
                    for &(l, b) in b_row {
                        entries.push((nb * i + k, nb * j + l, a * b));
                    }
                }
            }
        }
        storage.from_entries(order, entries)
    }

    /// Element-wise comparison within `tol`, independent of backend.
    fn approx_eq(&self, other: &dyn Matrix, tol: f64) -> bool {
        let n = self.order();
        if other.order() != n {
            return false;
        }
        (0..n).all(|i| (0..n).all(|j| (self.element(i, j) - other.element(i, j)).norm() <= tol))
    }
}

/// Shared textual rendering: one line per row, elements separated by two spaces.
pub(crate) fn fmt_matrix(m: &dyn Matrix, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let n = m.order();
    for i in 0..n {
        for j in 0..n {
            if j > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{}", m.element(i, j))?;
        }
        writeln!(f)?;
    }
    Ok(())
}

/// A matrix whose backend was chosen at runtime.
#[derive(Debug, Clone)]
pub enum DynMatrix {
    Dense(DenseMatrix),
    Sparse(SparseMatrix),
}

impl DynMatrix {
    fn inner(&self) -> &dyn Matrix {
        match self {
            DynMatrix::Dense(m) => m,
            DynMatrix::Sparse(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Matrix {
        match self {
            DynMatrix::Dense(m) => m,
            DynMatrix::Sparse(m) => m,
        }
    }
}

impl Matrix for DynMatrix {
    fn order(&self) -> usize {
        self.inner().order()
    }

    fn element(&self, row: usize, col: usize) -> Complex {
        self.inner().element(row, col)
    }

    fn set_element(&mut self, row: usize, col: usize, z: Complex) {
        self.inner_mut().set_element(row, col, z)
    }

    fn non_zero_count(&self) -> usize {
        self.inner().non_zero_count()
    }

    fn row_entries(&self, row: usize) -> Vec<(usize, Complex)> {
        self.inner().row_entries(row)
    }

    fn storage(&self) -> Storage {
        self.inner().storage()
    }
}

impl From<DenseMatrix> for DynMatrix {
    fn from(m: DenseMatrix) -> Self {
        DynMatrix::Dense(m)
    }
}

impl From<SparseMatrix> for DynMatrix {
    fn from(m: SparseMatrix) -> Self {
        DynMatrix::Sparse(m)
    }
}

impl fmt::Display for DynMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_matrix(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::ONE;

    fn c(re: f64, im: f64) -> Complex {
        Complex::new(re, im)
    }

    fn pauli_x_dense() -> DenseMatrix {
        DenseMatrix::from_rows(2, &[ZERO, ONE, ONE, ZERO])
    }

    #[test]
    fn test_select_storage() {
        assert_eq!(select_storage(4, 4, 4), Storage::Dense); // 16 > 8
        assert_eq!(select_storage(2, 4, 4), Storage::Sparse); // 8 == 8
        assert_eq!(select_storage(3, 3, 4), Storage::Dense);
        assert_eq!(select_storage(0, 100, 4), Storage::Sparse);
        assert_eq!(select_storage(usize::MAX, 2, 8), Storage::Dense);
    }

    #[test]
    fn test_identity_is_sparse() {
        let id = identity(4);
        assert_eq!(id.storage(), Storage::Sparse);
        assert_eq!(id.non_zero_count(), 4);
        assert_eq!(id.element(2, 2), ONE);
        assert_eq!(id.element(2, 3), ZERO);
    }

    #[test]
    fn test_multiply_vector() {
        let x = pauli_x_dense();
        let v = ComplexVector::from_vec(vec![c(1.0, 0.0), c(0.0, 2.0)]);
        let out = x.multiply_vector(&v).unwrap();
        assert_eq!(out.component(0), c(0.0, 2.0));
        assert_eq!(out.component(1), c(1.0, 0.0));
        assert!(x.multiply_vector(&ComplexVector::zeros(3)).is_err());
    }

    #[test]
    fn test_multiply_matrix_backends_agree() {
        let dense = pauli_x_dense();
        let sparse = SparseMatrix::from_rows(2, &[ZERO, ONE, ONE, ZERO]);

        let dd = dense.multiply(&dense).unwrap();
        let ss = sparse.multiply(&sparse).unwrap();
        let ds = dense.multiply(&sparse).unwrap();
        assert!(dd.approx_eq(&identity(2), 0.0));
        assert!(ss.approx_eq(&dd, 0.0));
        assert!(ds.approx_eq(&dd, 0.0));
        assert_eq!(dd.to_string(), ss.to_string());
    }

    #[test]
    fn test_multiply_order_mismatch() {
        let a = identity(2);
        let b = identity(4);
        assert_eq!(
            a.multiply(&b).unwrap_err(),
            QuantumError::length_mismatch(2, 4)
        );
    }

    #[test]
    fn test_multiply_result_storage_follows_heuristic() {
        let full = DenseMatrix::from_rows(2, &[ONE, ONE, ONE, ONE]);
        assert_eq!(full.multiply(&full).unwrap().storage(), Storage::Dense);
        // Identity times identity estimates n² non-zeros, above n²/2.
        let id = identity(4);
        let squared = id.multiply(&id).unwrap();
        assert_eq!(squared.storage(), Storage::Dense);
        assert!(squared.approx_eq(&id, 1e-12));

        // One entry times identity estimates 4 <= 8.
        let z = Complex::new(0.0, 2.0);
        let single = SparseMatrix::from_entries(4, [(1, 3, z)]);
        let product = single.multiply(&id).unwrap();
        assert_eq!(product.storage(), Storage::Sparse);
        assert_eq!(product.non_zero_count(), 1);
        assert_eq!(product.element(1, 3), z);
        assert!(product.approx_eq(&single, 1e-12));
    }

    #[test]
    fn test_tensor_product_layout() {
        // X ⊗ I: flips the high qubit
        let xi = pauli_x_dense().tensor_product(&identity(2));
        assert_eq!(xi.order(), 4);
        assert_eq!(xi.element(0, 2), ONE);
        assert_eq!(xi.element(1, 3), ONE);
        assert_eq!(xi.element(2, 0), ONE);
        assert_eq!(xi.element(3, 1), ONE);
        assert_eq!(xi.non_zero_count(), 4);

        // I ⊗ X: flips the low qubit
        let ix = identity(2).tensor_product(&pauli_x_dense());
        assert_eq!(ix.element(0, 1), ONE);
        assert_eq!(ix.element(2, 3), ONE);
        assert_eq!(ix.element(0, 2), ZERO);
    }

    #[test]
    fn test_tensor_product_general_entries() {
        let a = DenseMatrix::from_rows(2, &[c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0), c(4.0, 0.0)]);
        let b = DenseMatrix::from_rows(2, &[c(0.0, 1.0), ZERO, ZERO, c(5.0, 0.0)]);
        let t = a.tensor_product(&b);
        // A[1][0] * B[1][1] lands at (2*1+1, 2*0+1)
        assert_eq!(t.element(3, 1), c(15.0, 0.0));
        // A[0][1] * B[0][0] lands at (0, 2)
        assert_eq!(t.element(0, 2), c(0.0, 2.0));
        assert_eq!(t.element(0, 1), ZERO);
    }

    #[test]
    fn test_display_identical_across_backends() {
        let vals = [c(1.0, 0.0), ZERO, c(0.0, -1.0), c(0.5, 0.5)];
        let d = DenseMatrix::from_rows(2, &vals);
        let s = SparseMatrix::from_rows(2, &vals);
        assert_eq!(d.to_string(), s.to_string());
        assert_eq!(d.to_string(), "1+0i  0+0i\n0-1i  0.5+0.5i\n");
    }
}
