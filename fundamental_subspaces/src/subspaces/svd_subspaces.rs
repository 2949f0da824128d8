use itertools::Itertools;
use log::debug;
use nalgebra::DMatrix;

use super::extractor::{ensure_not_empty, SubspaceExtractor};
use super::fundamental::FundamentalSubspaces;
use super::params::ensure_tolerance;
use crate::error::{Result, SubspaceError};
use crate::real_matrix::Matrix;

const SVD_MAX_ITERATIONS: usize = 10_000;

/// Reads the fundamental subspaces off a singular value decomposition.
///
/// nalgebra only produces the thin decomposition, so the left null space and
/// null space are built as orthonormal complements of the retained singular
/// vectors. They span the same spaces as the trailing columns of a full `U`
/// and `V`.
pub struct SvdSubspaces {
    rank_tolerance: f64,
}

impl SvdSubspaces {
    pub fn new(rank_tolerance: f64) -> Self {
        Self { rank_tolerance }
    }
}

impl SubspaceExtractor for SvdSubspaces {
    fn extract(&self, a: &Matrix) -> Result<FundamentalSubspaces> {
        ensure_not_empty(a)?;
        ensure_tolerance("rank tolerance", self.rank_tolerance)?;
        let (m, n) = a.shape();
        let dense = DMatrix::from_fn(m, n, |r, c| a[(r, c)]);
        let svd = dense
            .try_svd(true, true, f64::EPSILON, SVD_MAX_ITERATIONS)
            .ok_or(SubspaceError::SvdDidNotConverge)?;
        let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
            return Err(SubspaceError::SvdDidNotConverge);
        };

        let retained =
            retained_singular_values(svd.singular_values.as_slice(), self.rank_tolerance);
        let rank = retained.len();
        debug!(
            "{m}x{n} matrix has rank {rank} with singular values {:?}",
            svd.singular_values.as_slice()
        );

        let u_r = u.select_columns(&retained);
        let v_r = v_t.transpose().select_columns(&retained);
        let left_null = orthonormal_complement(&u_r);
        let null = orthonormal_complement(&v_r);

        Ok(FundamentalSubspaces::new(
            to_matrix(&u_r),
            to_matrix(&v_r),
            to_matrix(&null),
            to_matrix(&left_null),
            rank,
        ))
    }
}

/// Indices of the singular values above `tolerance`, largest first.
fn retained_singular_values(singular_values: &[f64], tolerance: f64) -> Vec<usize> {
    singular_values
        .iter()
        .enumerate()
        .filter(|(_, s)| **s > tolerance)
        .sorted_by(|a, b| b.1.total_cmp(a.1))
        .map(|(idx, _)| idx)
        .collect()
}

// Householder QR of [basis | I]: the leading columns of Q span the basis, the
// trailing ones its orthogonal complement.
fn orthonormal_complement(basis: &DMatrix<f64>) -> DMatrix<f64> {
    let (dim, r) = basis.shape();
    if r == 0 {
        return DMatrix::identity(dim, dim);
    }
    if r == dim {
        return DMatrix::zeros(dim, 0);
    }
    let mut stacked = DMatrix::<f64>::zeros(dim, r + dim);
    stacked.columns_mut(0, r).copy_from(basis);
    stacked.columns_mut(r, dim).fill_with_identity();
    let q = stacked.qr().q();
    q.columns(r, dim - r).into_owned()
}

fn to_matrix(dense: &DMatrix<f64>) -> Matrix {
    Matrix::from_fn(dense.nrows(), dense.ncols(), |r, c| dense[(r, c)])
}

pub fn compute_subspaces_svd(matrix: &Matrix, tolerance: f64) -> Result<FundamentalSubspaces> {
    SvdSubspaces::new(tolerance).extract(matrix)
}
