use bitvec::prelude::*;
use log::trace;

use super::matrix::Matrix;
use super::DEFAULT_ZERO_TOLERANCE;

/// Leading nonzero entry of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pivot {
    pub row: usize,
    pub column: usize,
}

/// A matrix in reduced row-echelon form together with its pivots, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedRowEchelon {
    pub matrix: Matrix,
    pub pivots: Vec<Pivot>,
}

impl ReducedRowEchelon {
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    pub fn pivot_columns(&self) -> Vec<usize> {
        self.pivots.iter().map(|pivot| pivot.column).collect()
    }

    pub fn pivot_mask(&self) -> BitVec {
        let mut mask = bitvec![usize, Lsb0; 0; self.matrix.number_of_columns];
        for pivot in &self.pivots {
            mask.set(pivot.column, true);
        }
        mask
    }

    /// Columns without a pivot, in increasing order.
    pub fn free_columns(&self) -> Vec<usize> {
        self.pivot_mask().iter_zeros().collect()
    }
}

/// Back-substitutes a row-echelon matrix into reduced row-echelon form.
pub struct RrefNormalizer {
    zero_tolerance: f64,
}

impl RrefNormalizer {
    pub fn new(zero_tolerance: f64) -> Self {
        Self { zero_tolerance }
    }

    /// `matrix` must already be in row-echelon form.
    pub fn normalize(&self, mut matrix: Matrix) -> ReducedRowEchelon {
        let pivots = self.find_pivots(&matrix);
        debug_assert!(pivots.windows(2).all(|w| w[0].column < w[1].column));
        for pivot in pivots.iter().rev() {
            trace!("clearing above pivot ({}, {})", pivot.row, pivot.column);
            Self::normalize_pivot_row(&mut matrix, pivot);
            Self::eliminate_above(&mut matrix, pivot);
        }
        ReducedRowEchelon { matrix, pivots }
    }

    fn find_pivots(&self, matrix: &Matrix) -> Vec<Pivot> {
        matrix
            .rows
            .iter()
            .enumerate()
            .filter_map(|(row, values)| {
                values
                    .iter()
                    .position(|v| v.abs() > self.zero_tolerance)
                    .map(|column| Pivot { row, column })
            })
            .collect()
    }

    fn normalize_pivot_row(matrix: &mut Matrix, pivot: &Pivot) {
        let row = &mut matrix.rows[pivot.row];
        let leading = row[pivot.column];
        for value in row.iter_mut() {
            *value /= leading;
        }
    }

    fn eliminate_above(matrix: &mut Matrix, pivot: &Pivot) {
        let (upper, lower) = matrix.rows.split_at_mut(pivot.row);
        let pivot_row = &lower[0];
        for row in upper.iter_mut() {
            let factor = row[pivot.column];
            for (value, pivot_value) in row.iter_mut().zip(pivot_row) {
                *value -= factor * pivot_value;
            }
        }
    }
}

/// Turns a row-echelon matrix into reduced row-echelon form, returning it with
/// the pivot column of every nonzero row.
pub fn ref_to_rref(matrix: Matrix) -> (Matrix, Vec<usize>) {
    let rref = RrefNormalizer::new(DEFAULT_ZERO_TOLERANCE).normalize(matrix);
    let pivot_columns = rref.pivot_columns();
    (rref.matrix, pivot_columns)
}
