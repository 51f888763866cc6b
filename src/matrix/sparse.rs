use std::collections::BTreeMap;
use std::fmt;

use super::{Matrix, Storage, fmt_matrix};
use crate::complex::{Complex, ONE, ZERO};

/// Matrix backend storing only non-zero elements.
///
/// Elements are keyed by `row * order + col`. Reading an absent key yields
/// zero; writing zero removes the key.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    order: usize,
    values: BTreeMap<usize, Complex>,
}

impl SparseMatrix {
    pub fn zeros(order: usize) -> Self {
        SparseMatrix {
            order,
            values: BTreeMap::new(),
        }
    }

    pub fn identity(order: usize) -> Self {
        Self::from_entries(order, (0..order).map(|i| (i, i, ONE)))
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
        Self::from_entries(
            order,
            vals.iter()
                .enumerate()
                .map(|(idx, &z)| (idx / order, idx % order, z)),
        )
    }

    /// Build from `(row, col, value)` entries; later entries win.
    pub fn from_entries<I>(order: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, Complex)>,
    {
        let mut m = Self::zeros(order);
        for (r, c, z) in entries {
            m.set_element(r, c, z);
        }
        m
    }

    fn key(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.order && col < self.order);
        row * self.order + col
    }
}

impl Matrix for SparseMatrix {
    fn order(&self) -> usize {
        self.order
    }

    fn element(&self, row: usize, col: usize) -> Complex {
        self.values
            .get(&self.key(row, col))
            .copied()
            .unwrap_or(ZERO)
    }

    fn set_element(&mut self, row: usize, col: usize, z: Complex) {
        let key = self.key(row, col);
        if z != ZERO {
            self.values.insert(key, z);
        } else {
            self.values.remove(&key);
        }
    }

    fn non_zero_count(&self) -> usize {
        self.values.len()
    }

    fn row_entries(&self, row: usize) -> Vec<(usize, Complex)> {
        let start = row * self.order;
        self.values
            .range(start..start + self.order)
            .map(|(&key, &z)| (key - start, z))
            .collect()
    }

    fn storage(&self) -> Storage {
        Storage::Sparse
    }
}

impl fmt::Display for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_matrix(self, f)
    }
}
