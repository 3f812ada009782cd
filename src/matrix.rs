//! Dense matrices, as produced by the multiplication operators.
//!
//! Operations taking two operands, or an index, expect compatible shapes and
//! panic otherwise, the same way slice indexing does.

use std::ops::{Index, IndexMut};

use crate::{
    error::QuotientError,
    field::{CommutativeRing, Scalar},
};

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<C> {
    data: Vec<C>,
    num_rows: usize,
    num_cols: usize,
}

impl<C: CommutativeRing> DenseMatrix<C> {
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![C::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from its rows, which must all have the same length.
    pub fn from_rows(rows: Vec<Vec<C>>) -> Result<Self, QuotientError> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != num_cols)
        {
            return Err(QuotientError::RaggedRows {
                row,
                expected: num_cols,
                found,
            });
        }

        Ok(Self {
            data: rows.into_iter().flatten().collect(),
            num_rows,
            num_cols,
        })
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = C::one();
        }
        m
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&C> {
        if row < self.num_rows && col < self.num_cols {
            Some(&self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[C] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    pub fn col(&self, col: usize) -> Vec<C> {
        (0..self.num_rows)
            .map(|row| self[(row, col)].clone())
            .collect()
    }

    /// # Panics
    ///
    /// Panics if col is out of range or values does not have one entry per
    /// row.
    pub fn set_col(&mut self, col: usize, values: Vec<C>) {
        assert_eq!(values.len(), self.num_rows);
        for (row, value) in values.into_iter().enumerate() {
            self[(row, col)] = value;
        }
    }

    /// Matrix-vector product.
    ///
    /// # Panics
    ///
    /// Panics if x does not have one entry per column.
    pub fn mv(&self, x: &[C]) -> Vec<C> {
        assert_eq!(x.len(), self.num_cols);
        (0..self.num_rows)
            .map(|row| {
                let mut sum = C::zero();
                for (a, b) in self.row(row).iter().zip(x.iter()) {
                    let mut prod = a.clone();
                    prod *= b;
                    sum += prod;
                }
                sum
            })
            .collect()
    }

    /// Matrix-matrix product.
    ///
    /// # Panics
    ///
    /// Panics if the number of columns of self differs from the number of
    /// rows of other.
    pub fn mm(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_rows);
        let mut result = Self::zeros(self.num_rows, other.num_cols);
        for i in 0..self.num_rows {
            for k in 0..self.num_cols {
                let a = &self[(i, k)];
                if a.is_zero() {
                    continue;
                }
                for j in 0..other.num_cols {
                    let mut prod = a.clone();
                    prod *= &other[(k, j)];
                    result[(i, j)] += prod;
                }
            }
        }
        result
    }

    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.num_cols, self.num_rows);
        for i in 0..self.num_rows {
            for j in 0..self.num_cols {
                result[(j, i)] = self[(i, j)].clone();
            }
        }
        result
    }

    /// Sum of the diagonal, which for a multiplication operator is the sum of
    /// its eigenvalues.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    pub fn trace(&self) -> C {
        assert!(self.is_square());
        let mut sum = C::zero();
        for i in 0..self.num_rows {
            sum += self[(i, i)].clone();
        }
        sum
    }
}

impl<C: Scalar> DenseMatrix<C> {
    /// Entrywise comparison up to tolerance.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.num_rows == other.num_rows
            && self.num_cols == other.num_cols
            && self.data.iter().zip(other.data.iter()).all(|(a, b)| {
                let mut diff = a.clone();
                diff -= b.clone();
                diff.is_negligible(tolerance)
            })
    }
}

impl<C> Index<(usize, usize)> for DenseMatrix<C> {
    type Output = C;

    fn index(&self, (row, col): (usize, usize)) -> &C {
        &self.data[row * self.num_cols + col]
    }
}

impl<C> IndexMut<(usize, usize)> for DenseMatrix<C> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut C {
        &mut self.data[row * self.num_cols + col]
    }
}

impl<C: std::fmt::Display> std::fmt::Display for DenseMatrix<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.num_rows {
            f.write_str("[")?;
            for col in 0..self.num_cols {
                if col > 0 {
                    f.write_str(", ")?;
                }
                std::fmt::Display::fmt(&self.data[row * self.num_cols + col], f)?;
            }
            f.write_str("]\n")?;
        }
        Ok(())
    }
}
