use strum_macros::{Display, EnumIter};

use crate::real_matrix::is_in_nullspace::is_in_nullspace;
use crate::real_matrix::Matrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Subspace {
    #[strum(serialize = "column space")]
    ColumnSpace,
    #[strum(serialize = "row space")]
    RowSpace,
    #[strum(serialize = "null space")]
    NullSpace,
    #[strum(serialize = "left null space")]
    LeftNullSpace,
}

/// Bases of the four fundamental subspaces of an `m x n` matrix, each stored
/// as the columns of a matrix. An empty basis has zero columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FundamentalSubspaces {
    pub column_space: Matrix,
    pub row_space: Matrix,
    pub null_space: Matrix,
    pub left_null_space: Matrix,
    pub rank: usize,
}

impl FundamentalSubspaces {
    pub(crate) fn new(
        column_space: Matrix,
        row_space: Matrix,
        null_space: Matrix,
        left_null_space: Matrix,
        rank: usize,
    ) -> Self {
        debug_assert_eq!(column_space.number_of_columns, rank);
        debug_assert_eq!(row_space.number_of_columns, rank);
        debug_assert_eq!(
            null_space.number_of_columns + rank,
            null_space.number_of_rows()
        );
        debug_assert_eq!(
            left_null_space.number_of_columns + rank,
            left_null_space.number_of_rows()
        );
        Self {
            column_space,
            row_space,
            null_space,
            left_null_space,
            rank,
        }
    }

    pub fn basis(&self, subspace: Subspace) -> &Matrix {
        match subspace {
            Subspace::ColumnSpace => &self.column_space,
            Subspace::RowSpace => &self.row_space,
            Subspace::NullSpace => &self.null_space,
            Subspace::LeftNullSpace => &self.left_null_space,
        }
    }

    pub fn dimension(&self, subspace: Subspace) -> usize {
        self.basis(subspace).number_of_columns
    }

    pub fn nullity(&self) -> usize {
        self.dimension(Subspace::NullSpace)
    }

    pub fn left_nullity(&self) -> usize {
        self.dimension(Subspace::LeftNullSpace)
    }

    /// Checks that `a` annihilates the null space basis and `a^T` the left
    /// null space basis, entrywise within `tolerance`.
    pub fn validate(&self, a: &Matrix, tolerance: f64) -> bool {
        is_in_nullspace(a, &self.null_space, tolerance)
            && is_in_nullspace(&a.transpose(), &self.left_null_space, tolerance)
    }
}
