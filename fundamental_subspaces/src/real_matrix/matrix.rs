use std::fmt;
use std::ops::{Index, IndexMut};

use itertools::Itertools;

use crate::error::{Result, SubspaceError};

/// Dense row-major matrix of `f64`.
///
/// A matrix with zero columns still keeps its rows, so an empty basis of
/// vectors in `R^m` is an `m x 0` matrix rather than a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub number_of_columns: usize,
    pub rows: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeroes(rows: usize, cols: usize) -> Self {
        Self {
            number_of_columns: cols,
            rows: (0..rows).map(|_| vec![0.0; cols]).collect(),
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut identity = Self::zeroes(n, n);
        for (idx, row) in identity.rows.iter_mut().enumerate() {
            row[idx] = 1.0;
        }
        identity
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        Self {
            number_of_columns: cols,
            rows: (0..rows)
                .map(|r| (0..cols).map(|c| f(r, c)).collect())
                .collect(),
        }
    }

    /// Builds a matrix from row vectors, rejecting ragged or non-finite input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let number_of_columns = rows.first().map_or(0, Vec::len);
        if let Some((row, actual)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != number_of_columns)
        {
            return Err(SubspaceError::RaggedRows {
                row,
                expected: number_of_columns,
                actual,
            });
        }
        let matrix = Self {
            number_of_columns,
            rows,
        };
        matrix.ensure_finite()?;
        Ok(matrix)
    }

    /// Reshapes a flattened row-major buffer into a `rows x cols` matrix.
    pub fn from_flat(rows: usize, cols: usize, values: &[f64]) -> Result<Self> {
        let expected = rows.checked_mul(cols).ok_or(SubspaceError::Shape {
            rows,
            cols,
            reason: "number of entries overflows usize",
        })?;
        if values.len() != expected {
            return Err(SubspaceError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }
        let rows = if cols == 0 {
            vec![Vec::new(); rows]
        } else {
            values.chunks_exact(cols).map(<[f64]>::to_vec).collect()
        };
        let matrix = Self {
            number_of_columns: cols,
            rows,
        };
        matrix.ensure_finite()?;
        Ok(matrix)
    }

    // every column must have `number_of_rows` entries
    pub(crate) fn from_columns(number_of_rows: usize, columns: &[Vec<f64>]) -> Self {
        debug_assert!(columns.iter().all(|col| col.len() == number_of_rows));
        Self::from_fn(number_of_rows, columns.len(), |r, c| columns[c][r])
    }

    fn ensure_finite(&self) -> Result<()> {
        for (row, values) in self.rows.iter().enumerate() {
            if let Some(col) = values.iter().position(|v| !v.is_finite()) {
                return Err(SubspaceError::NonFiniteEntry { row, col });
            }
        }
        Ok(())
    }

    pub fn number_of_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.number_of_rows(), self.number_of_columns)
    }

    /// True when the matrix has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.number_of_columns == 0
    }

    pub fn column(&self, c: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[c]).collect()
    }

    pub fn columns(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.number_of_columns).map(|c| self.column(c))
    }

    pub fn select_columns(&self, indices: &[usize]) -> Self {
        Self::from_fn(self.number_of_rows(), indices.len(), |r, c| {
            self.rows[r][indices[c]]
        })
    }

    pub(crate) fn top_rows(&self, count: usize) -> Self {
        Self {
            number_of_columns: self.number_of_columns,
            rows: self.rows[..count].to_vec(),
        }
    }

    pub fn transpose(&self) -> Self {
        Self::from_fn(self.number_of_columns, self.number_of_rows(), |r, c| {
            self.rows[c][r]
        })
    }

    pub fn product(&self, other: &Matrix) -> Result<Self> {
        if self.number_of_columns != other.number_of_rows() {
            return Err(SubspaceError::DimensionMismatch {
                expected: self.number_of_columns,
                actual: other.number_of_rows(),
            });
        }
        Ok(Self::from_fn(
            self.number_of_rows(),
            other.number_of_columns,
            |r, c| {
                self.rows[r]
                    .iter()
                    .zip(other.rows.iter())
                    .map(|(a, other_row)| a * other_row[c])
                    .sum()
            },
        ))
    }

    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.shape() == other.shape()
            && self
                .rows
                .iter()
                .flatten()
                .zip(other.rows.iter().flatten())
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        &self.rows[r][c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        &mut self.rows[r][c]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .rows
            .iter()
            .map(|row| format!("[{}]", row.iter().join(", ")))
            .join("\n");
        f.write_str(&rendered)
    }
}
