use itertools::Itertools;
use log::debug;

use super::extractor::{ensure_not_empty, SubspaceExtractor};
use super::fundamental::FundamentalSubspaces;
use super::params::ReductionParams;
use crate::error::{Result, SubspaceError};
use crate::real_matrix::row_echelon::row_echelon_with_tolerance;
use crate::real_matrix::rref::{ReducedRowEchelon, RrefNormalizer};
use crate::real_matrix::Matrix;

/// Extracts the fundamental subspaces from the reduced row-echelon forms of
/// `A` and `A^T`.
///
/// The left null space comes from reducing `A^T` separately. When an entry
/// sits close to the zero tolerance the two reductions can disagree on rank;
/// extraction then fails with [`SubspaceError::InconsistentRank`] instead of
/// returning bases whose dimensions do not add up.
pub struct RrefSubspaces {
    params: ReductionParams,
}

impl RrefSubspaces {
    pub fn new(params: ReductionParams) -> Self {
        Self { params }
    }

    pub fn reduce(&self, matrix: Matrix) -> ReducedRowEchelon {
        let echelon = row_echelon_with_tolerance(matrix, self.params.zero_tolerance);
        RrefNormalizer::new(self.params.zero_tolerance).normalize(echelon)
    }
}

/// One special solution of `Rx = 0` per free column: the free variable is set
/// to 1 and every pivot variable to minus its coefficient in that column.
pub fn null_space_from_rref(rref: &ReducedRowEchelon) -> Matrix {
    let n = rref.matrix.number_of_columns;
    let special_solutions = rref
        .free_columns()
        .into_iter()
        .map(|free| {
            let mut solution = vec![0.0; n];
            solution[free] = 1.0;
            for pivot in &rref.pivots {
                solution[pivot.column] = -rref.matrix[(pivot.row, free)];
            }
            solution
        })
        .collect_vec();
    Matrix::from_columns(n, &special_solutions)
}

impl SubspaceExtractor for RrefSubspaces {
    fn extract(&self, a: &Matrix) -> Result<FundamentalSubspaces> {
        ensure_not_empty(a)?;
        self.params.validate()?;
        let (m, n) = a.shape();
        let rref = self.reduce(a.clone());
        let rank = rref.rank();
        debug!("{m}x{n} matrix has rank {rank}, pivots in {:?}", rref.pivot_columns());

        let column_space = a.select_columns(&rref.pivot_columns());
        let row_space = rref.matrix.top_rows(rank).transpose();
        let null_space = null_space_from_rref(&rref);

        let transposed_rref = self.reduce(a.transpose());
        if transposed_rref.rank() != rank {
            return Err(SubspaceError::InconsistentRank {
                rank,
                transpose_rank: transposed_rref.rank(),
            });
        }
        let left_null_space = null_space_from_rref(&transposed_rref);

        Ok(FundamentalSubspaces::new(
            column_space,
            row_space,
            null_space,
            left_null_space,
            rank,
        ))
    }
}

pub fn compute_subspaces(matrix: &Matrix) -> Result<FundamentalSubspaces> {
    RrefSubspaces::new(ReductionParams::default()).extract(matrix)
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use strum::IntoEnumIterator;

    use super::*;
    use crate::real_matrix::is_in_nullspace::is_in_nullspace;
    use crate::subspaces::fundamental::Subspace;

    fn matrix(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    fn assert_rank_nullity(a: &Matrix, subspaces: &FundamentalSubspaces) {
        let (m, n) = a.shape();
        assert_eq!(subspaces.column_space.shape(), (m, subspaces.rank));
        assert_eq!(subspaces.row_space.shape(), (n, subspaces.rank));
        assert_eq!(subspaces.null_space.shape(), (n, n - subspaces.rank));
        assert_eq!(subspaces.left_null_space.shape(), (m, m - subspaces.rank));
    }

    #[test]
    fn duplicated_rows_example() {
        let a = matrix(vec![
            vec![1.0, 2.0, 3.0, 1.0],
            vec![1.0, 1.0, 2.0, 1.0],
            vec![1.0, 2.0, 3.0, 1.0],
        ]);
        let subspaces = compute_subspaces(&a).unwrap();
        assert_eq!(subspaces.rank, 2);
        assert_rank_nullity(&a, &subspaces);
        assert_eq!(subspaces.column_space, a.select_columns(&[0, 1]));
        assert!(subspaces.row_space.approx_eq(
            &matrix(vec![
                vec![1.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 1.0],
                vec![1.0, 0.0],
            ]),
            1e-12
        ));
        assert!(subspaces.null_space.approx_eq(
            &matrix(vec![
                vec![-1.0, -1.0],
                vec![-1.0, 0.0],
                vec![1.0, 0.0],
                vec![0.0, 1.0],
            ]),
            1e-12
        ));
        assert_eq!(subspaces.left_null_space.shape(), (3, 1));
        assert!(subspaces.validate(&a, 1e-9));
    }

    #[test]
    fn zero_matrix_has_full_null_spaces() {
        let a = Matrix::zeroes(3, 3);
        let subspaces = compute_subspaces(&a).unwrap();
        assert_eq!(subspaces.rank, 0);
        assert_eq!(subspaces.column_space.shape(), (3, 0));
        assert_eq!(subspaces.row_space.shape(), (3, 0));
        assert_eq!(subspaces.null_space, Matrix::identity(3));
        assert_eq!(subspaces.left_null_space, Matrix::identity(3));
    }

    #[test]
    fn rank_one_example() {
        let a = matrix(vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]]);
        let subspaces = compute_subspaces(&a).unwrap();
        assert_eq!(subspaces.rank, 1);
        assert_eq!(subspaces.nullity(), 2);
        assert_eq!(subspaces.left_nullity(), 1);
        let y = subspaces.left_null_space.column(0);
        for col in a.columns() {
            assert_abs_diff_eq!(y[0] * col[0] + y[1] * col[1], 0.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(y[0], -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn full_rank_square_matrix_has_trivial_null_spaces() {
        let a = matrix(vec![
            vec![0.0, 2.0, 1.0],
            vec![1.0, 0.0, 0.0],
            vec![3.0, 1.0, 5.0],
        ]);
        let subspaces = compute_subspaces(&a).unwrap();
        assert_eq!(subspaces.rank, 3);
        assert_eq!(subspaces.column_space, a);
        assert!(subspaces.row_space.approx_eq(&Matrix::identity(3), 1e-12));
        assert_eq!(subspaces.null_space.shape(), (3, 0));
        assert_eq!(subspaces.left_null_space.shape(), (3, 0));
    }

    #[test]
    fn zero_column_is_a_free_variable() {
        let a = matrix(vec![vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 4.0]]);
        let subspaces = compute_subspaces(&a).unwrap();
        assert_eq!(subspaces.rank, 1);
        assert_eq!(subspaces.column_space, a.select_columns(&[1]));
        assert!(subspaces.null_space.approx_eq(
            &matrix(vec![vec![1.0, 0.0], vec![0.0, -2.0], vec![0.0, 1.0]]),
            1e-12
        ));
    }

    #[test]
    fn input_matrix_is_left_untouched() {
        let a = matrix(vec![vec![2.0, 4.0], vec![1.0, 3.0]]);
        let before = a.clone();
        compute_subspaces(&a).unwrap();
        assert_eq!(a, before);
    }

    #[test]
    fn loose_tolerance_lowers_the_rank() {
        let a = matrix(vec![vec![1.0, 0.0], vec![0.0, 1e-6]]);
        assert_eq!(compute_subspaces(&a).unwrap().rank, 2);
        let loose = RrefSubspaces::new(ReductionParams::new(1e-3, 1e-3));
        assert_eq!(loose.extract(&a).unwrap().rank, 1);
    }

    #[test]
    fn invalid_zero_tolerance_is_rejected_before_reducing() {
        let a = matrix(vec![vec![0.0, 1.0], vec![0.0, 0.0]]);
        for zero_tolerance in [-1.0, f64::NAN, f64::INFINITY] {
            let extractor = RrefSubspaces::new(ReductionParams::new(zero_tolerance, 1e-10));
            assert!(matches!(
                extractor.extract(&a),
                Err(SubspaceError::InvalidTolerance { name: "zero tolerance", .. })
            ));
        }
    }

    #[test]
    fn disagreeing_transpose_rank_is_an_error() {
        // elimination in A and A^T rounds differently against the 1e-3 tolerance
        let a = matrix(vec![
            vec![6.8e-4, 1.54e-3, 1.9],
            vec![0.0, 0.0, 2.0],
            vec![0.0, 0.0, 3.0],
            vec![0.0, 2.8, 0.0],
        ]);
        let loose = RrefSubspaces::new(ReductionParams::new(1e-3, 1e-3));
        assert_eq!(loose.reduce(a.clone()).rank(), 2);
        assert_eq!(loose.reduce(a.transpose()).rank(), 3);
        assert_eq!(
            loose.extract(&a),
            Err(SubspaceError::InconsistentRank {
                rank: 2,
                transpose_rank: 3
            })
        );
        assert_eq!(compute_subspaces(&a).unwrap().rank, 3);
    }

    #[test]
    fn random_rank_deficient_matrices_satisfy_rank_nullity() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let m = rng.gen_range(1..=5);
            let n = rng.gen_range(1..=5);
            let mut a = Matrix::from_fn(m, n, |_, _| rng.gen_range(-3..=3) as f64);
            if m > 1 {
                // force a dependent row
                let source = rng.gen_range(0..m);
                let target = rng.gen_range(0..m);
                let scale = rng.gen_range(-2..=2) as f64;
                a.rows[target] = a.rows[source].iter().map(|v| v * scale).collect();
            }
            let subspaces = compute_subspaces(&a).unwrap();
            assert_rank_nullity(&a, &subspaces);
            assert!(is_in_nullspace(&a, &subspaces.null_space, 1e-9), "{a}");
            assert!(
                is_in_nullspace(&a.transpose(), &subspaces.left_null_space, 1e-9),
                "{a}"
            );
            for subspace in Subspace::iter() {
                assert_eq!(
                    subspaces.basis(subspace).number_of_rows(),
                    match subspace {
                        Subspace::ColumnSpace | Subspace::LeftNullSpace => m,
                        Subspace::RowSpace | Subspace::NullSpace => n,
                    }
                );
            }
        }
    }
}
